//! `tvform`: edit TV application settings in the terminal.
//!
//! Without flags the built-in settings catalog is opened in an interactive
//! editor. `--print` and `--schema` run headless and write JSON to stdout.

use std::fmt::Write as FmtWrite;
use std::fs::{self, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tvform::{
    DocumentFormat, FormEngine, FormModel, SettingsUI, UiOptions,
    io::{encode_data, encode_document, parse_document_any, write_stdout},
    tv_settings_model, validate_data,
};

const DEFAULT_LOG_FILTER: &str = "tvform=info";
const DEFAULT_LOG_FILE: &str = "tvform.log";

#[derive(Debug, Parser)]
#[command(
    name = "tvform",
    version,
    about = "Edit TV application settings in an interactive terminal form"
)]
struct Cli {
    /// Field catalog document (file path, or "-" for stdin); defaults to the built-in TV settings
    #[arg(long = "catalog", value_name = "SPEC")]
    catalog: Option<String>,

    /// Initial data: file path, inline JSON, or "-" for stdin
    #[arg(short = 'd', long = "data", value_name = "SPEC")]
    data: Option<String>,

    /// Validate --data against the catalog before applying it
    #[arg(long = "strict")]
    strict: bool,

    /// Print the serialized form as JSON and exit without opening the editor
    #[arg(short = 'p', long = "print", conflicts_with = "schema")]
    print: bool,

    /// Print the JSON Schema of the form data and exit
    #[arg(long = "schema")]
    schema: bool,

    /// Emit compact JSON instead of pretty output (--print / --schema)
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Directory downloads (Ctrl+S) are saved into
    #[arg(long = "out-dir", value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// File name used for downloads
    #[arg(long = "filename", value_name = "NAME")]
    filename: Option<String>,

    /// Title shown at the top of the editor
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Disable mouse capture
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Log file used while the editor owns the terminal
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn headless(&self) -> bool {
        self.print || self.schema
    }
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut diagnostics = DiagnosticCollector::default();
    if cli.catalog.as_deref() == Some("-") && cli.data.as_deref() == Some("-") {
        diagnostics.push_input(
            "catalog/data",
            "cannot read catalog and data from stdin simultaneously",
        );
    }
    let model = load_model(cli.catalog.as_deref(), &mut diagnostics);
    let data = load_data(cli.data.as_deref(), &mut diagnostics);
    if let Some(out_dir) = &cli.out_dir
        && !out_dir.is_dir()
    {
        diagnostics.push_output(format!("{} is not a directory", out_dir.display()));
    }
    if let Some(name) = &cli.filename
        && (name.trim().is_empty() || name.contains(['/', '\\']))
    {
        diagnostics.push_output(format!("'{name}' is not a plain file name"));
    }
    if cli.strict
        && let (Some(model), Some(data)) = (model.as_ref(), data.as_ref())
        && let Err(issues) = validate_data(model, data)
    {
        for issue in issues {
            diagnostics.push_input("data", issue);
        }
    }
    diagnostics.into_result()?;

    let model = model.unwrap_or_else(tv_settings_model);
    let pretty = !cli.no_pretty;

    if cli.schema {
        let schema = encode_document(&model.data_schema(), DocumentFormat::Json, pretty)
            .map_err(Report::msg)?;
        return write_stdout(&schema).map_err(Report::msg);
    }

    if cli.print {
        let mut engine = FormEngine::new(model);
        engine.render(&mut Vec::new());
        if let Some(data) = &data {
            engine
                .deserialize(data)
                .wrap_err("data does not fit the form")?;
        }
        let payload = if pretty {
            encode_data(&engine.serialize()).map_err(Report::msg)?
        } else {
            encode_document(
                &Value::Object(engine.serialize()),
                DocumentFormat::Json,
                false,
            )
            .map_err(Report::msg)?
        };
        return write_stdout(&payload).map_err(Report::msg);
    }

    let mut options = UiOptions::default().with_mouse(!cli.no_mouse);
    if let Some(dir) = &cli.out_dir {
        options = options.with_download_dir(dir.clone());
    }
    if let Some(name) = &cli.filename {
        options = options.with_download_name(name.clone());
    }

    let mut ui = SettingsUI::new(model).with_options(options);
    if let Some(title) = &cli.title {
        ui = ui.with_title(title.clone());
    }
    if let Some(data) = data {
        ui = ui.with_data(data);
    }
    let final_data = ui.run().map_err(Report::msg)?;
    info!(fields = final_data.len(), "editor closed");
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if cli.headless() {
        builder.with_writer(io::stderr).init();
        return Ok(());
    }

    // The editor owns the terminal, so log lines go to a file instead.
    let path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    builder
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    debug!(log = %path.display(), "logging to file");
    Ok(())
}

fn load_model(spec: Option<&str>, diagnostics: &mut DiagnosticCollector) -> Option<FormModel> {
    let spec = spec?;
    let source = input_source(spec);
    let contents = match read_from_source(&source) {
        Ok(contents) => contents,
        Err(err) => {
            diagnostics.push_input("catalog", format!("{err:#}"));
            return None;
        }
    };
    let value = match parse_contents(&contents, format_hint(spec), "catalog") {
        Ok(value) => value,
        Err(err) => {
            diagnostics.push_input("catalog", err.to_string());
            return None;
        }
    };
    match serde_json::from_value::<FormModel>(value) {
        Ok(model) if model.is_empty() => {
            diagnostics.push_input("catalog", "catalog declares no fields");
            None
        }
        Ok(model) => {
            let duplicates = model.duplicate_ids();
            if !duplicates.is_empty() {
                eprintln!(
                    "warning: duplicate field ids {}; the first field with each id wins",
                    duplicates.join(", ")
                );
            }
            Some(model)
        }
        Err(err) => {
            diagnostics.push_input("catalog", format!("not a field catalog: {err}"));
            None
        }
    }
}

fn load_data(spec: Option<&str>, diagnostics: &mut DiagnosticCollector) -> Option<Value> {
    let spec = spec?;
    let value = match load_value(spec, format_hint(spec), "data") {
        Ok(value) => value,
        Err(err) => {
            diagnostics.push_input("data", format!("{err:#}"));
            return None;
        }
    };
    if !value.is_object() {
        diagnostics.push_input("data", "form data must be a JSON object");
        return None;
    }
    Some(value)
}

fn input_source(spec: &str) -> InputSource {
    if spec == "-" {
        InputSource::Stdin
    } else {
        InputSource::File(PathBuf::from(spec))
    }
}

fn format_hint(spec: &str) -> DocumentFormat {
    if spec == "-" {
        return DocumentFormat::default();
    }
    DocumentFormat::from_path(Path::new(spec)).unwrap_or_default()
}

fn load_value(spec: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    let source = input_source(spec);
    match read_from_source(&source) {
        Ok(contents) => parse_contents(&contents, format, label),
        Err(err) if matches!(source, InputSource::File(_)) && is_not_found(&err) => {
            parse_contents(spec, format, &format!("inline {label}"))
        }
        Err(err) => Err(err),
    }
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn is_not_found(err: &Report) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

fn parse_contents(contents: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    parse_document_any(contents, format).map_err(|primary| {
        eyre!(
            "failed to parse {label}: tried {} (first error: {primary})",
            format_list()
        )
    })
}

fn format_list() -> String {
    let items: Vec<String> = DocumentFormat::available_formats()
        .into_iter()
        .map(|fmt| fmt.to_string())
        .collect();
    items.join(", ")
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}
