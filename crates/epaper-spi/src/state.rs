//! Refresh cycle states
//!
//! One full panel update walks these states in order; the driver advances at
//! most one phase per poll so the caller's loop stays responsive.

/// Phase of the panel refresh cycle.
///
/// `Failed` is terminal: the driver refuses further cycles once a fatal
/// error has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EpaperState {
    /// No refresh in progress.
    Idle,
    /// Driving the falling edge of a reset pulse.
    Reset,
    /// Driving the rising edge of a reset pulse.
    ResetEnd,
    /// Rendering the caller's frame into the buffer.
    Update,
    /// Programming the controller with the model's init sequence.
    Initialise,
    /// Streaming the frame buffer to controller RAM.
    TransferData,
    /// Enabling the panel power rails.
    PowerOn,
    /// Model-specific follow-up after power-on.
    PostPowerOn,
    /// Triggering the physical ink refresh.
    RefreshScreen,
    /// Disabling the panel power rails.
    PowerOff,
    /// Putting the controller into deep sleep.
    DeepSleep,
    /// The cycle aborted on an error.
    Failed,
}

impl EpaperState {
    /// Whether the driver must wait for the busy pin to clear before
    /// processing this state.
    ///
    /// Everything from init onward talks to a controller that signals
    /// readiness on the busy line; the reset and render phases do not.
    pub const fn requires_idle(self) -> bool {
        matches!(
            self,
            Self::Initialise
                | Self::TransferData
                | Self::PowerOn
                | Self::PostPowerOn
                | Self::RefreshScreen
                | Self::PowerOff
                | Self::DeepSleep
        )
    }

    /// Human-readable state name for log messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Reset => "reset",
            Self::ResetEnd => "reset end",
            Self::Update => "update",
            Self::Initialise => "initialise",
            Self::TransferData => "transfer data",
            Self::PowerOn => "power on",
            Self::PostPowerOn => "post power on",
            Self::RefreshScreen => "refresh screen",
            Self::PowerOff => "power off",
            Self::DeepSleep => "deep sleep",
            Self::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_gating_covers_controller_states_only() {
        assert!(!EpaperState::Idle.requires_idle());
        assert!(!EpaperState::Reset.requires_idle());
        assert!(!EpaperState::ResetEnd.requires_idle());
        assert!(!EpaperState::Update.requires_idle());
        assert!(!EpaperState::Failed.requires_idle());

        assert!(EpaperState::Initialise.requires_idle());
        assert!(EpaperState::TransferData.requires_idle());
        assert!(EpaperState::PowerOn.requires_idle());
        assert!(EpaperState::PostPowerOn.requires_idle());
        assert!(EpaperState::RefreshScreen.requires_idle());
        assert!(EpaperState::PowerOff.requires_idle());
        assert!(EpaperState::DeepSleep.requires_idle());
    }
}
