mod cli;

use clap::Parser;
use env_logger::Builder;
use log::{debug, error};

use network_info_helper::{config::ResolverConfig, lookup::WanIpLookup};

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    Builder::new().filter_level(cli.loglevel.into()).init();

    let config = ResolverConfig {
        dns: cli.dns,
        http: cli.http,
    };

    match WanIpLookup::new().read(&config) {
        Ok(info) => {
            debug!("Resolved WAN address {} as {}", info, info.identity);
            println!("{}", info.wan_ip_address);
        }
        Err(e) => {
            error!("Could not resolve WAN address: {}", e);
            std::process::exit(1);
        }
    }
}
