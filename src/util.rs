use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

const MONIT_CONFIG: &str = "MONIT_CONFIG";

pub fn get_config_path() -> PathBuf {
    std::env::var(MONIT_CONFIG).map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

const MONIT_DATABASE: &str = "MONIT_DATABASE";

const DEFAULT_DATABASE: &str = "/var/monit/monit.db";

pub fn get_database_path() -> PathBuf {
    std::env::var(MONIT_DATABASE).map_or_else(|_| PathBuf::from(DEFAULT_DATABASE), PathBuf::from)
}

const MONIT_PORT: &str = "MONIT_PORT";

const DEFAULT_PORT: u16 = 8000;

pub fn get_port() -> u16 {
    let port_from_env = std::env::var(MONIT_PORT);
    port_from_env.map_or(DEFAULT_PORT, |res| res.parse().unwrap_or(DEFAULT_PORT))
}

const MONIT_ADDR: &str = "MONIT_ADDR";

const DEFAULT_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

pub fn get_addr() -> IpAddr {
    let addr_from_env = std::env::var(MONIT_ADDR);
    addr_from_env.map_or(DEFAULT_ADDR, |res| res.parse().unwrap_or(DEFAULT_ADDR))
}

pub fn get_bind_addr() -> SocketAddr {
    SocketAddr::new(get_addr(), get_port())
}
