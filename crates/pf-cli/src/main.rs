fn main() {
    pf_cli::init_tracing();
    std::process::exit(pf_cli::run_cli_from_args(std::env::args_os()));
}
