use std::fs;
use std::path::{Path, PathBuf};

use structopt::StructOpt;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wsdlgen_codegen::{generate, Options};
use wsdlgen_wsdl::fetch::Fetcher;
use wsdlgen_wsdl::location::Location;

#[derive(Debug, StructOpt)]
#[structopt(name = "wsdlgen", about = "Generates Rust code from a WSDL description.")]
struct Args {
    /// Path or URL of the WSDL description.
    input: String,

    /// File name of the generated client source.
    #[structopt(short, long, default_value = "service.rs")]
    output: String,

    /// Package name used in the generated files.
    #[structopt(short, long, default_value = "service")]
    package: String,

    /// Directory the package is written under.
    #[structopt(short, long, default_value = "./")]
    dir: PathBuf,

    /// Skip TLS certificate verification when downloading.
    #[structopt(short, long)]
    insecure: bool,

    /// Keep generated declarations private to the generated module.
    #[structopt(long)]
    private: bool,
}

#[derive(Debug, Error)]
enum Error {
    #[error("an input file is required")]
    MissingInput,

    #[error("output file {0:?} would overwrite the input")]
    OutputClobbersInput(String),

    #[error(transparent)]
    Wsdl(#[from] wsdlgen_wsdl::error::Error),

    #[error(transparent)]
    Codegen(#[from] wsdlgen_codegen::error::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl Args {
    fn validate(&self) -> Result<(), Error> {
        if self.input.trim().is_empty() {
            return Err(Error::MissingInput);
        }
        if self.input == self.output {
            return Err(Error::OutputClobbersInput(self.output.clone()));
        }
        Ok(())
    }

    fn package_name(&self) -> &str {
        let trimmed = self.package.trim();
        if trimmed.is_empty() {
            "service"
        } else {
            trimmed
        }
    }
}

#[paw::main]
fn main(args: Args) -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    args.validate()?;

    let location = Location::parse(&args.input)?;
    let fetcher =
        Fetcher::new(args.insecure).with_cache_dir(std::env::temp_dir().join("wsdlgen-cache"));

    let document = wsdlgen_wsdl::load(&location, &fetcher)?;

    let options = Options {
        package: args.package_name().to_owned(),
        export_all: !args.private,
    };
    let artifacts = generate(&document, &options)?;

    let package_dir = args.dir.join(args.package_name());
    fs::create_dir_all(&package_dir)?;

    let client_path = package_dir.join(&args.output);
    let server_path = package_dir.join(server_file_name(&args.output));

    fs::write(&client_path, artifacts.client)?;
    if let Err(err) = fs::write(&server_path, artifacts.server) {
        // Both artifacts or neither.
        let _ = fs::remove_file(&client_path);
        return Err(err.into());
    }

    info!(path = %client_path.display(), "wrote client source");
    info!(path = %server_path.display(), "wrote server source");

    Ok(())
}

fn server_file_name(output: &str) -> String {
    match Path::new(output).file_name().and_then(|name| name.to_str()) {
        Some(name) => format!("server_{name}"),
        None => "server_service.rs".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str, output: &str, package: &str) -> Args {
        Args {
            input: input.to_owned(),
            output: output.to_owned(),
            package: package.to_owned(),
            dir: PathBuf::from("./"),
            insecure: false,
            private: false,
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            args("", "service.rs", "service").validate(),
            Err(Error::MissingInput)
        ));
        assert!(matches!(
            args("   ", "service.rs", "service").validate(),
            Err(Error::MissingInput)
        ));
    }

    #[test]
    fn rejects_output_matching_input() {
        assert!(matches!(
            args("service.wsdl", "service.wsdl", "service").validate(),
            Err(Error::OutputClobbersInput(_))
        ));
        assert!(args("service.wsdl", "service.rs", "service").validate().is_ok());
    }

    #[test]
    fn package_name_falls_back_to_default() {
        assert_eq!(args("a.wsdl", "b.rs", "").package_name(), "service");
        assert_eq!(args("a.wsdl", "b.rs", "  ").package_name(), "service");
        assert_eq!(args("a.wsdl", "b.rs", " stock ").package_name(), "stock");
    }

    #[test]
    fn server_output_is_prefixed() {
        assert_eq!(server_file_name("service.rs"), "server_service.rs");
        assert_eq!(server_file_name("api/svc.rs"), "server_svc.rs");
    }
}
