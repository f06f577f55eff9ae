#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Counterexample report, as JSON or as an HTML page embedding it
        #[arg(default_value = "report.json")]
        report: PathBuf,

        /// Display settings file
        #[arg(long, default_value = cex_viewer::settings::SETTINGS_FILE)]
        settings: PathBuf,
    }

    tracing_subscriber::fmt::init();
    let args = Args::parse();
    cex_viewer::native::run(&args.report, &args.settings)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // This binary is not meant to be used for WASM.
    // Use the library's start() function instead.
}
