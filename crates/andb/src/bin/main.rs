use std::fs::File;
use std::io::{BufReader, stdin};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use andb::options;
use andb::reader::StatementReader;
use andb::session::{Session, SessionError, SessionOptions};
use andb_catalog::Catalog;
use andb_parser::ParserError;

fn main() -> anyhow::Result<()> {
    let options = options::parse();

    // logs go to stderr so result rows on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut catalog = Catalog::new();
    catalog.init();

    let result = process_statements(&options, &mut catalog);

    catalog.deinit();
    result
}

fn process_statements(options: &options::Options, catalog: &mut Catalog) -> anyhow::Result<()> {
    let mut session = Session::new(catalog, SessionOptions {
        explain: options.explain,
    });

    if let Some(path) = &options.file {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let reader = StatementReader::new(BufReader::new(file), false);
        run_loop(&mut session, reader);
    } else {
        let reader = StatementReader::new(stdin().lock(), true);
        run_loop(&mut session, reader);
    }
    Ok(())
}

fn run_loop<R: std::io::BufRead>(session: &mut Session<'_>, mut reader: StatementReader<R>) {
    while let Some(statement) = reader.next_statement() {
        match session.run(&statement) {
            Ok(output) => {
                if let Some(explain) = output.explain {
                    println!("{explain}");
                }
                for row in &output.rows {
                    println!("{row}");
                }
            }
            Err(SessionError::Parse(err)) => report_parse_error(&statement, &err),
            Err(err) => eprintln!("EXCEPTION: {err}"),
        }
    }
}

fn report_parse_error(statement: &str, err: &ParserError) {
    let location = err.location();
    println!("FAILED: {statement}");
    println!(
        "ERROR: {err} L = {} C = {}",
        location.line, location.column
    );
}
