use millwright_build::{Outcome, ScriptPipeline, parse_cli, run};

#[tokio::main]
async fn main() {
    millwright_observability::tracing::init("warn");

    let outcome = match parse_cli(std::env::args_os()) {
        Ok(cli) => match ScriptPipeline::from_command_line(&cli.pipeline) {
            Ok(pipeline) => run(&cli.build_options(), &pipeline).await,
            Err(e) => Outcome {
                message: e.to_string(),
                exit_code: 1,
            },
        },
        Err(outcome) => outcome,
    };

    println!("{}", outcome.message);
    std::process::exit(outcome.exit_code);
}
