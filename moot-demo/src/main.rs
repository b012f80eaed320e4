use std::process::ExitCode;

use anyhow::Context;
use moot::{
    Field, FieldType, ParseError, Parser, Schema, Value, build_arguments, coerce_and_structure,
};

fn schema() -> Schema {
    let server = Schema::new("server")
        .field(
            Field::new("host", FieldType::Str)
                .default("localhost")
                .description("address to bind"),
        )
        .field(Field::new("port", FieldType::Scalar).description("port to bind"))
        .field(
            Field::new("reuse_port", FieldType::Bool)
                .default(true)
                .description("allow multiple binds to the same port"),
        );

    Schema::new("demo")
        .description("A demonstration of schema-driven argument parsing.")
        .field(
            Field::new("verbose", FieldType::Bool)
                .default(false)
                .description("enable noisy output"),
        )
        .field(
            Field::new(
                "log_level",
                FieldType::Enumeration(vec!["debug".into(), "info".into(), "warn".into()]),
            )
            .default("info")
            .description("log verbosity"),
        )
        .field(
            Field::new("workers", FieldType::Literal(vec![Value::Int(1), Value::Int(2), Value::Int(4)]))
                .default(Value::Int(1))
                .description("worker count"),
        )
        .field(
            Field::new("tags", FieldType::Collection(Box::new(FieldType::Str)))
                .optional()
                .description("labels to attach"),
        )
        .field(
            Field::new("overrides", FieldType::Mapping)
                .optional()
                .description("settings overrides, as a literal map"),
        )
        .field(
            Field::new("serve", FieldType::Model(server)).description("run the server"),
        )
}

fn run() -> anyhow::Result<ExitCode> {
    let schema = schema();

    let mut parser = Parser::new(schema.name.clone(), schema.description.as_deref());
    let coercions =
        build_arguments(&schema, &mut parser).context("failed to register schema")?;

    let args: Vec<Vec<u8>> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.into_encoded_bytes())
        .collect();

    let raw = match parser.parse(args.iter().map(|arg| arg.as_slice())) {
        Ok(raw) => raw,
        Err(ParseError::HelpRequested { help }) => {
            println!("{help}");
            return Ok(ExitCode::SUCCESS);
        }
        Err(error) => {
            eprintln!("error: {error}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let structured =
        coerce_and_structure(raw, &coercions).context("failed to structure results")?;

    println!("{structured:#?}");
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
