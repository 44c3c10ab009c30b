#![deny(unsafe_code)]
//! CLI binary for the artgen procedural art generator.
//!
//! `artgen <style>` renders one image and writes it as a PNG;
//! `artgen --list` prints the available styles and their parameters.

mod error;

use artgen_core::{clock_seed, Generator, Seed};
use artgen_engines::GeneratorKind;
use clap::Parser;
use error::CliError;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "artgen", about = "Procedural abstract art generator")]
struct Cli {
    /// Art style (noise, radial, squares, polygons, triangles, rectangles).
    #[arg(required_unless_present = "list")]
    style: Option<String>,

    /// Output file path.
    #[arg(short, long, default_value = "art.png")]
    output: PathBuf,

    /// Background color: a color name, "r,g,b" (0-255) or "#rrggbb".
    #[arg(long, visible_alias = "bg", default_value = "black")]
    background: String,

    /// PRNG seed for reproducible output; clock-derived when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Output resolution in dots per inch.
    #[arg(long, default_value_t = artgen_core::seed::DEFAULT_DPI)]
    dpi: u32,

    /// Generator parameters as a JSON object.
    #[arg(long, default_value = "{}")]
    params: String,

    /// List available styles and their parameters.
    #[arg(long)]
    list: bool,

    /// Output as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,
}

fn list(json_mode: bool) -> Result<(), CliError> {
    let styles = GeneratorKind::list_generators();
    if json_mode {
        let mut schemas = serde_json::Map::new();
        for name in styles {
            let generator = GeneratorKind::from_name(name, &json!({}))?;
            schemas.insert(name.to_string(), generator.param_schema());
        }
        let info = json!({ "styles": schemas });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Styles:");
        for name in styles {
            let generator = GeneratorKind::from_name(name, &json!({}))?;
            let schema = generator.param_schema();
            let keys: Vec<&str> = schema
                .as_object()
                .map(|o| o.keys().map(String::as_str).collect())
                .unwrap_or_default();
            println!("  {name:<11} {}", keys.join(", "));
        }
    }
    Ok(())
}

fn parse_params(raw: &str) -> Result<Value, CliError> {
    let params: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    if !params.is_object() {
        return Err(CliError::Input(
            "invalid --params JSON: expected an object".to_string(),
        ));
    }
    Ok(params)
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.list {
        return list(cli.json);
    }
    let style = cli
        .style
        .ok_or_else(|| CliError::Input("missing style".to_string()))?;

    let params = parse_params(&cli.params)?;
    let seed = Seed::new(&style, cli.seed.unwrap_or_else(clock_seed))
        .with_background(&cli.background)?
        .with_dpi(cli.dpi)
        .with_params(params);

    let outcome = artgen_engines::render_to_path(&seed, &cli.output)?;

    if cli.json {
        let info = json!({
            "seed": serde_json::to_value(&seed)?,
            "output": cli.output.display().to_string(),
            "width": outcome.width,
            "height": outcome.height,
            "shapes": outcome.shapes,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {style} ({}x{}, {} shapes, seed {}) -> {}",
            outcome.width,
            outcome.height,
            outcome.shapes,
            seed.seed,
            cli.output.display()
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_apply() {
        let cli = Cli::try_parse_from(["artgen", "noise"]).unwrap();
        assert_eq!(cli.style.as_deref(), Some("noise"));
        assert_eq!(cli.output, PathBuf::from("art.png"));
        assert_eq!(cli.background, "black");
        assert_eq!(cli.dpi, 300);
        assert_eq!(cli.seed, None);
        assert!(!cli.list && !cli.json);
    }

    #[test]
    fn bg_alias_and_flags_parse() {
        let cli = Cli::try_parse_from([
            "artgen", "radial", "--bg", "blue", "-o", "out.png", "--seed", "7", "--dpi", "72",
        ])
        .unwrap();
        assert_eq!(cli.background, "blue");
        assert_eq!(cli.output, PathBuf::from("out.png"));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.dpi, 72);
    }

    #[test]
    fn style_required_unless_listing() {
        assert!(Cli::try_parse_from(["artgen"]).is_err());
        assert!(Cli::try_parse_from(["artgen", "--list"]).is_ok());
    }

    #[test]
    fn params_must_be_a_json_object() {
        assert!(parse_params(r#"{"rows": 4}"#).is_ok());
        assert_eq!(parse_params("{bad").unwrap_err().exit_code(), 12);
        assert_eq!(parse_params("[1, 2]").unwrap_err().exit_code(), 12);
    }

    #[test]
    fn bad_background_is_input_error() {
        let cli = Cli::try_parse_from(["artgen", "noise", "--bg", "999,0,0"]).unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("999,0,0"));
    }

    #[test]
    fn unknown_style_is_engine_error() {
        let path = std::env::temp_dir().join("artgen-cli-unknown-style.png");
        let cli = Cli::try_parse_from(["artgen", "spirals", "-o", path.to_str().unwrap()]).unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 10);
        assert!(!path.exists());
    }
}
