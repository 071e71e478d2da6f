//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including each subprocess as it starts.
    Verbose,
    /// Show progress, results and guidance.
    #[default]
    Normal,
    /// Show results only, without guidance blocks or hints.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl OutputMode {
    /// Mode for `--verbose` and a count of `--quiet` flags.
    ///
    /// Quiet wins over verbose; `-qq` silences everything but errors.
    pub fn from_flags(verbose: bool, quiet: u8) -> Self {
        match (verbose, quiet) {
            (_, 0) if verbose => Self::Verbose,
            (_, 0) => Self::Normal,
            (_, 1) => Self::Quiet,
            _ => Self::Silent,
        }
    }

    /// Check if this mode announces each operation before it runs.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Check if this mode shows guidance blocks and hints.
    pub fn shows_guidance(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
