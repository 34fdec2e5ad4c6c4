fn main() {
    if let Err(e) = fitkro_lib::run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
