//! prepares a rail-only transit scenario (schedule, network, fleet) for the
//! railsim micro-simulation engine from imported and mapped artifacts.
use bambam_railsim::app::RailsimApp;
use clap::Parser;

fn main() {
    env_logger::init();
    let args = RailsimApp::parse();
    match args.op.run() {
        Ok(report) => {
            if !report.is_clean() {
                log::warn!(
                    "finished with {} advisories, see warnings above",
                    report.advisories.len()
                );
            }
            eprintln!("finished.");
        }
        Err(e) => {
            log::error!("bambam-railsim failed: {e}");
            std::process::exit(1);
        }
    }
}
