fn main() {
    env_logger::init();

    if let Err(e) = skyraid::run() {
        eprintln!("skyraid failed to start: {e:#}");
        std::process::exit(1);
    }
}
