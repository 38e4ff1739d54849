use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::sync::RwLock;

lazy_static! {
    static ref CONF_FILE_PATH: RwLock<String> = RwLock::new(String::from("conf/server-conf.toml"));
    pub static ref CONF: Conf = build_conf();
}

#[derive(Debug, Deserialize)]
pub struct Conf {
    pub db: DbConf,
    pub workers: WorkerConf,
}

#[derive(Debug, Deserialize)]
pub struct DbConf {
    pub database_uri: String,
    pub max_db_connections: Option<u32>,
    pub db_idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct WorkerConf {
    pub actix_workers: Option<usize>,
}

fn build_conf() -> Conf {
    let conf_file_path = CONF_FILE_PATH.read().expect("Lock was poisoned");

    let mut conf_file = File::open::<&str>(conf_file_path.as_ref()).unwrap_or_else(|_| {
        eprintln!("ERROR: Expected configuration file at '{conf_file_path}'");
        std::process::exit(1);
    });

    let mut contents = String::new();
    conf_file.read_to_string(&mut contents).unwrap_or_else(|_| {
        eprintln!(
            "ERROR: Configuration file at '{conf_file_path}' should be a text file in the TOML format."
        );
        std::process::exit(1);
    });

    match toml::from_str::<Conf>(&contents) {
        Ok(conf) => conf,
        Err(e) => {
            eprintln!("ERROR: Parsing '{conf_file_path}' failed: {e}");
            std::process::exit(1);
        }
    }
}

pub fn initialize(conf_file_path: &str) {
    *CONF_FILE_PATH.write().expect("Lock was poisoned") = String::from(conf_file_path);

    // Forego lazy initialization in order to validate conf file
    lazy_static::initialize(&crate::env::CONF);
}

#[cfg(test)]
pub mod testing {
    use std::time::Duration;
    use stokvel_common::db::{create_db_thread_pool, DbThreadPool};

    const DB_URI_VAR: &str = "STOKVEL_TEST_DB_URI";

    lazy_static! {
        pub static ref DB_THREAD_POOL: DbThreadPool = {
            let db_uri = std::env::var(DB_URI_VAR)
                .unwrap_or_else(|_| panic!("Environment variable {DB_URI_VAR} must be set"));

            create_db_thread_pool(&db_uri, 48, Duration::from_secs(30))
        };
    }
}
