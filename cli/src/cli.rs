use clap::Parser;

/// Runs one command under the execution engine and exits with the derived
/// status.
#[derive(Parser, Debug)]
#[command(name = "checkrun")]
pub struct Args {
    /// Shell command line to execute.
    pub command: String,

    /// Deadline in seconds; 0 waits for natural completion.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// KEY=VALUE pair replacing the child environment (repeatable; when
    /// given, the ambient environment is not inherited).
    #[arg(long = "env")]
    pub env: Vec<String>,

    /// Text piped to the child's stdin.
    #[arg(long)]
    pub input: Option<String>,

    /// Logical name of the execution.
    #[arg(long, default_value = "")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_with_options() {
        let args = Args::parse_from([
            "checkrun",
            "--timeout",
            "30",
            "--env",
            "FOO=bar",
            "--env",
            "BAZ=qux",
            "--name",
            "disk-check",
            "df -h",
        ]);
        assert_eq!(args.command, "df -h");
        assert_eq!(args.timeout, Some(30));
        assert_eq!(args.env, vec!["FOO=bar", "BAZ=qux"]);
        assert_eq!(args.name, "disk-check");
        assert!(args.input.is_none());
    }

    #[test]
    fn timeout_defaults_to_unset() {
        let args = Args::parse_from(["checkrun", "true"]);
        assert_eq!(args.timeout, None);
        assert!(args.env.is_empty());
    }
}
