//! unroller: runs the demo scenarios and prints what each produced.
//!
//! thin orchestration: config -> scenarios -> stdout

use unroller_core::config::Config;
use unroller_core::scenarios;

fn main() {
    // debug builds: init logger with nanosecond timestamps
    #[cfg(debug_assertions)]
    {
        use std::io::Write;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .format(|buf, record| {
                let ts = buf.timestamp_nanos();
                writeln!(
                    buf,
                    "[{} {:5} {}:{}] {}",
                    ts,
                    record.level(),
                    record.module_path().unwrap_or(""),
                    record.line().unwrap_or(0),
                    record.args()
                )
            })
            .init();
    }

    let config = match Config::from_env_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[core] invalid config: {}", e);
            std::process::exit(2);
        }
    };

    let names: Vec<&str> = config.scenarios.iter().map(|s| s.name()).collect();
    eprintln!("[core] scenarios={}", names.join(","));
    eprintln!("[core] scale={} prefix={:?}", config.scale, config.prefix);
    eprintln!("[core] runtime={}", config.runtime.descriptor());

    for &scenario in &config.scenarios {
        match scenarios::run(scenario, &config) {
            Ok(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Err(e) => {
                eprintln!("[core] {} failed: {}", scenario, e);
                std::process::exit(1);
            }
        }
    }

    eprintln!("[core] done");
}
