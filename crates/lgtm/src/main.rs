//! LGTM entrypoint.

fn main() -> anyhow::Result<()> {
    lgtm::initialize_command_line()
}
