use crate::errors::ScanError;
use crate::target::is_valid_target;

/// Named preset of nmap flags, or a user-supplied custom flag string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Fast,
    Standard,
    Version,
    Os,
    Aggressive,
    Custom,
    /// Fallback for unrecognized scan-type strings from the UI.
    Default,
}

impl ScanMode {
    /// Map the request's `scanType` string. Unknown values get the default
    /// preset rather than an error, matching what the UI expects.
    pub fn from_request(s: &str) -> Self {
        match s {
            "fast" => ScanMode::Fast,
            "standard" => ScanMode::Standard,
            "version" => ScanMode::Version,
            "os" => ScanMode::Os,
            "aggressive" => ScanMode::Aggressive,
            "custom" => ScanMode::Custom,
            _ => ScanMode::Default,
        }
    }

    fn preset_flags(self) -> &'static [&'static str] {
        match self {
            ScanMode::Fast => &["-F"],
            ScanMode::Standard => &["-p-"],
            ScanMode::Version => &["-sV", "-F"],
            ScanMode::Os => &["-O", "-F"],
            ScanMode::Aggressive => &["-A"],
            // Custom carries its own flags; preset is never consulted.
            ScanMode::Custom | ScanMode::Default => &["-F", "-sV", "-O"],
        }
    }
}

const TOOL: &str = "nmap";
const PRIVILEGE_PREFIX: &str = "sudo";
const OUTPUT_FLAGS: [&str; 2] = ["-oX", "-"];

/// Assemble the full nmap argv for a validated target and mode.
///
/// The result is always an argument vector, never a shell string; the target
/// and custom flags are user-controlled and must not pass through a shell.
/// The vector always ends with the XML-to-stdout output flags and contains
/// the target exactly once.
pub fn build_command(
    target: &str,
    mode: ScanMode,
    custom_flags: &str,
    use_sudo: bool,
) -> Result<Vec<String>, ScanError> {
    let target = target.trim();
    if target.is_empty() {
        return Err(ScanError::MissingTarget);
    }
    if !is_valid_target(target) {
        return Err(ScanError::InvalidTarget(target.to_string()));
    }

    let mut cmd: Vec<String> = Vec::new();
    if use_sudo {
        cmd.push(PRIVILEGE_PREFIX.to_string());
    }
    cmd.push(TOOL.to_string());

    if mode == ScanMode::Custom {
        let mut tokens = custom_flags.split_whitespace().peekable();
        // Users often paste a full command line; drop the leading tool name.
        if tokens.peek() == Some(&TOOL) {
            tokens.next();
        }
        // Drop any token equal to the target so it appears exactly once.
        cmd.extend(
            tokens
                .filter(|t| *t != target)
                .map(str::to_string),
        );
    } else {
        cmd.extend(mode.preset_flags().iter().map(|f| f.to_string()));
    }

    cmd.push(target.to_string());
    cmd.extend(OUTPUT_FLAGS.iter().map(|f| f.to_string()));
    Ok(cmd)
}
