mod cli;
mod commands;

use cli::{AstParams, GenerateParams, TranslateParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        Some(("translate", m)) => {
            let params = TranslateParams::from_matches(m);
            commands::translate::run(params.into());
        }
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
