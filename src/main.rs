fn main() {
    if let Err(err) = lablens_lib::run() {
        tracing::error!(error = %err, "lablens failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
