//! Binary entrypoint for the seedsweep CLI.

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = seedsweep_cli::run().await;
    std::process::exit(exit_code);
}
