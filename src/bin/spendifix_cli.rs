use spendifix_core::{cli, init};

fn main() {
    init();

    std::process::exit(cli::run());
}
