use std::process::ExitCode;

fn main() -> ExitCode {
    shape_diff::main()
}
