//! Generates the Stash It launcher icons as PNG files
#![deny(warnings)]

use stash_icon::*;
use std::env;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    set: IconSet,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut set = IconSet::default();
        let mut icons = Vec::new();
        let mut output_dir = None;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "stash-icon".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" | "--help" => {
                    usage(&cmd);
                    std::process::exit(0);
                }
                "-o" => {
                    output_dir = Some(args.next().ok_or("-o requires argument")?);
                }
                "-s" => {
                    let spec = args.next().ok_or("-s requires <size>[:<file>] argument")?;
                    icons.push(spec.parse::<IconSpec>()?);
                }
                #[cfg(feature = "serde")]
                "-c" => {
                    let config = args.next().ok_or("-c requires argument")?;
                    set = IconSet::from_json(&std::fs::read_to_string(config)?)?;
                }
                "-bg" => {
                    set.palette.primary = args
                        .next()
                        .ok_or("-bg requires color #rrggbb(aa) argument")?
                        .parse()?;
                }
                "-fg" => {
                    set.palette.bookmark = args
                        .next()
                        .ok_or("-fg requires color #rrggbb(aa) argument")?
                        .parse()?;
                }
                "-ac" => {
                    set.palette.accent = args
                        .next()
                        .ok_or("-ac requires color #rrggbb(aa) argument")?
                        .parse()?;
                }
                _ => {
                    usage(&cmd);
                    return Err(format!("unexpected argument: {}", arg).into());
                }
            }
        }
        if let Some(output_dir) = output_dir {
            set.output_dir = output_dir.into();
        }
        if !icons.is_empty() {
            set.icons = icons;
        }
        Ok(Args { set })
    }
}

fn usage(cmd: &str) {
    eprintln!("Generates the Stash It launcher icons as PNG files");
    eprintln!("\nUSAGE:");
    eprintln!(
        "    {} [-o <dir>] [-s <size>[:<file>]]... [-c <set.json>] [-bg <color>] [-fg <color>] [-ac <color>]",
        cmd
    );
    eprintln!("\nARGS:");
    eprintln!("    -o <dir>           output directory (default: assets/icon)");
    eprintln!("    -s <size>[:<file>] icon to generate, replaces the default list");
    eprintln!("    -c <set.json>      load icon set from a JSON file");
    eprintln!("    -bg <color>        background color");
    eprintln!("    -fg <color>        bookmark color");
    eprintln!("    -ac <color>        accent color of the line and the arrow");
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    println!("Generating Stash It app icons...\n");

    let mut failed = 0;
    for generated in args.set.generate()? {
        match generated.result {
            Ok(_) => println!(
                "Created {} ({}x{})",
                generated.path.display(),
                generated.spec.size,
                generated.spec.size
            ),
            Err(error) => {
                failed += 1;
                eprintln!("Failed {}: {}", generated.path.display(), error);
            }
        }
    }
    if failed > 0 {
        return Err(format!("failed to generate {} icon(s)", failed).into());
    }

    println!("\nAll icons generated successfully!");
    Ok(())
}
