use std::io::{self, BufRead as _, Write as _};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_ansi(true)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let lexer = ruly_example_calc::grammar::lexer()?;
    let parser = ruly_example_calc::grammar::parser();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        tracing::trace!("evaluating {:?}", line);
        match parser.parse(lexer.tokenize(line)) {
            Ok(result) => match result.value {
                Some(value) => println!("{}", value),
                None => eprintln!("error: result token carries no value"),
            },
            Err(err) => eprintln!("error: {}", err),
        }
    }

    Ok(())
}
