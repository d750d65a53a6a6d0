use std::process::ExitCode;

fn main() -> ExitCode {
    newslens_lib::run()
}
