//! Command implementations for the address resolver CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::resolver::{DictionaryResolver, InMemoryExecutor, assemble_addresses};

/// Execute a CLI command.
pub fn execute_command(args: ResolverArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Command::Correct(correct_args) => correct(correct_args, &args, &mut out),
        Command::Query(query_args) => query(query_args, &args, &mut out),
        Command::Resolve(resolve_args) => resolve(resolve_args, &args, &mut out),
        Command::Assemble(assemble_args) => assemble(assemble_args, &args, &mut out),
    }
}

/// Load the configuration named on the command line, or the defaults.
fn load_config(args: &ResolverArgs) -> Result<ResolverConfig> {
    match &args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            ResolverConfig::load(path)
        }
        None => Ok(ResolverConfig::default()),
    }
}

fn build_resolver(
    args: &ResolverArgs,
    executor: InMemoryExecutor,
) -> Result<DictionaryResolver<InMemoryExecutor>> {
    let config = load_config(args)?;
    DictionaryResolver::from_config(&config, executor)
}

/// Input lines from a file, or from stdin when no file is given.
fn read_lines(input: Option<&Path>) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}

fn correct<W: Write>(args: &CorrectArgs, cli_args: &ResolverArgs, out: &mut W) -> Result<()> {
    let resolver = build_resolver(cli_args, InMemoryExecutor::default())?;

    for line in read_lines(args.input.as_deref())? {
        let words = resolver.correct(&line);
        write_result(out, &CorrectionResult { input: line, words }, cli_args)?;
    }
    Ok(())
}

fn query<W: Write>(args: &QueryArgs, cli_args: &ResolverArgs, out: &mut W) -> Result<()> {
    let resolver = build_resolver(cli_args, InMemoryExecutor::default())?;
    let options = args.options();

    for line in read_lines(args.input.as_deref())? {
        let query = resolver.build_query(&line, options);
        if query.is_none() {
            debug!("not enough address words in {line:?}");
        }
        write_result(out, &QueryResult { input: line, query }, cli_args)?;
    }
    Ok(())
}

fn resolve<W: Write>(args: &ResolveArgs, cli_args: &ResolverArgs, out: &mut W) -> Result<()> {
    let executor = InMemoryExecutor::from_json_file(&args.rows)?;
    let resolver = build_resolver(cli_args, executor)?;

    let lines = read_lines(args.input.as_deref())?;
    let results = resolver.resolve_batch(&lines, args.options());

    for (line, addresses) in lines.iter().zip(results) {
        let input = args.show_input.then_some(line.as_str());
        for address in &addresses {
            write_result(out, &AddressRecord::new(input, address, args.show_address), cli_args)?;
        }
    }
    Ok(())
}

fn assemble<W: Write>(args: &AssembleArgs, cli_args: &ResolverArgs, out: &mut W) -> Result<()> {
    let executor = InMemoryExecutor::from_json_file(&args.rows)?;
    let addresses = assemble_addresses(executor.rows());
    info!("assembled {} addresses", addresses.len());

    for address in &addresses {
        write_result(out, &AddressRecord::new(None, address, args.show_address), cli_args)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use clap::Parser;
    use tempfile::NamedTempFile;

    use super::*;

    const ROWS: &str = r#"[{
        "AddrobjOffname": ["Москва", "Арбат"],
        "AddrobjAoguid": ["msk", "arbat"],
        "AddrobjSocrname": ["г", "ул"],
        "AddrobjPostalcode": ["", "119002"]
    }]"#;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    fn run(argv: &[&str]) -> String {
        let args = ResolverArgs::parse_from(argv);
        let mut out = Vec::new();
        match &args.command {
            Command::Correct(a) => correct(a, &args, &mut out),
            Command::Query(a) => query(a, &args, &mut out),
            Command::Resolve(a) => resolve(a, &args, &mut out),
            Command::Assemble(a) => assemble(a, &args, &mut out),
        }
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_correct_command() {
        let input = temp_file("маршала жукова\n");
        let path = input.path().to_str().unwrap();
        assert_eq!(run(&["address-resolver", "correct", path]), "маршала жукова\n");
    }

    #[test]
    fn test_query_command() {
        let input = temp_file("москва арбат\nарбат\n");
        let path = input.path().to_str().unwrap();

        let output = run(&["address-resolver", "query", path, "--no-correct"]);
        assert!(output.starts_with("MATCH (r:Root), (a0:Addrobj), (a1:Addrobj)"));
        assert!(output.contains("a0.biggestword = 'москва'"));
        assert!(output.ends_with("LIMIT 100\n\n\n"));
    }

    #[test]
    fn test_resolve_command() {
        let rows = temp_file(ROWS);
        let input = temp_file("Москва, Арбат\n");

        let output = run(&[
            "address-resolver",
            "resolve",
            input.path().to_str().unwrap(),
            "--rows",
            rows.path().to_str().unwrap(),
            "--show-input",
            "--show-address",
        ]);
        assert_eq!(output, "Москва, Арбат;г Москва, ул Арбат, 119002;msk;arbat\n");
    }

    #[test]
    fn test_assemble_command() {
        let rows = temp_file(ROWS);
        let path = rows.path().to_str().unwrap();

        assert_eq!(run(&["address-resolver", "assemble", path]), "msk;arbat\n");
        assert_eq!(
            run(&["address-resolver", "-f", "json", "assemble", path, "--show-address"]),
            "{\"address\":\"г Москва, ул Арбат, 119002\",\"ids\":[\"msk\",\"arbat\"]}\n"
        );
    }

    #[test]
    fn test_missing_rows_file() {
        let args = ResolverArgs::parse_from(["address-resolver", "assemble", "/nonexistent/rows.json"]);
        assert!(execute_command(args).is_err());
    }
}
