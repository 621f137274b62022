use clap::Parser;
use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "User input error: Check if you are providing in following way: vmip <filename>";
const BANNER: &str = "Please find below extracted IP addresses from the file:";

/// Print the validated VM IP addresses found in a JSON dump.
#[derive(Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Opts {
    /// JSON file holding `vm_private_ips` and `network` sections
    #[arg(allow_hyphen_values = true)]
    filename: PathBuf,
}

fn usage() -> ! {
    println!("{}", USAGE);
    process::exit(1)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Exactly one argument, always taken as the file path, whatever it looks like.
    let args: Vec<_> = env::args_os().collect();
    if args.len() != 2 {
        tracing::debug!(count = args.len().saturating_sub(1), "wrong argument count");
        usage();
    }
    let argv = [args[0].as_os_str(), OsStr::new("--"), args[1].as_os_str()];
    let opts = match Opts::try_parse_from(argv) {
        Ok(opts) => opts,
        Err(e) => {
            tracing::debug!(error = %e, "bad arguments");
            usage();
        }
    };

    match vmip::extract(&opts.filename) {
        Ok(lines) => {
            println!("{}", BANNER);
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => {
            tracing::debug!(error = ?e, "extraction failed");
            println!("{}", e);
            process::exit(e.exit_code());
        }
    }
}
