//! sshrc - bring your shell configuration along over ssh.
//!
//! Packages `$SSHHOME/.sshrc` and `$SSHHOME/.sshrc.d` into a single remote
//! command and runs `ssh -t` with it.

use clap::Parser;
use sshrc::config::LOG_ENV;
use sshrc::launcher::SshTransport;
use sshrc::{Error, Result, SshrcConfig};
use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sshrc")]
#[command(author, disable_help_flag = true, disable_version_flag = true)]
#[command(
    about = "Bring your .sshrc to any host over ssh",
    long_about = "Connects with ssh and starts an interactive bash that sources your .sshrc and .sshrc.d from a temporary directory removed on exit."
)]
struct Cli {
    /// Host followed by any options passed through to ssh
    #[arg(
        value_name = "HOST [SSH OPTIONS]",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    ssh_args: Vec<OsString>,
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match &e {
            Error::Usage => println!("{}", e),
            _ => eprintln!("Error: {}", e),
        }
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.ssh_args.is_empty() {
        return Err(Error::Usage);
    }

    let config = SshrcConfig::from_env();
    let transport = SshTransport::new(config.ssh_program.clone());

    sshrc::run(&cli.ssh_args, &config, &transport)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
