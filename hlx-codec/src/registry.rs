//! Grammar registry
//!
//! The `ERROR` fallback frame plus a startup check that recompiles every
//! pattern in the grammar table from its source text. Both endpoints call
//! [`verify_grammar`] during initialization so a malformed table entry
//! surfaces as [`CodecError::InitializationFailed`](crate::CodecError) rather
//! than a panic on first use mid-session.

use hlx_wire::CommandPattern;

use crate::command::regex_escape;
use crate::error::Result;

hlx_fixed_frame! {
    /// The error response: exactly `ERROR`, no object, no identifier
    pub struct ErrorFrame = "ERROR";
}

/// Compile the request and response forms of one frame-body pattern
fn check_command((body, arity): (&str, usize)) -> Result<()> {
    CommandPattern::compile(&format!("^{body}$"), arity)?;
    CommandPattern::compile(&format!(r"^\({body}\)$"), arity)?;
    Ok(())
}

/// Compile the pattern of one fixed-text frame
fn check_fixed(text: &str) -> Result<()> {
    CommandPattern::compile(&format!("^{}$", regex_escape(text)), 0)?;
    Ok(())
}

/// Compile every pattern in the grammar table, independent of the cached
/// statics
///
/// Intended to be called once from client/server `init`, before any pattern
/// is used for matching. A bad entry is reported as
/// [`CodecError::InitializationFailed`](crate::CodecError).
pub fn verify_grammar() -> Result<()> {
    use crate::{configuration, equalizer, favorite, front_panel, group, infrared, network, source, zone};

    let grammar = [
        zone::QueryZone::GRAMMAR,
        zone::QueryVolume::GRAMMAR,
        zone::QueryMute::GRAMMAR,
        zone::Name::GRAMMAR,
        zone::Volume::GRAMMAR,
        zone::IncreaseVolume::GRAMMAR,
        zone::DecreaseVolume::GRAMMAR,
        zone::Mute::GRAMMAR,
        zone::ToggleMute::GRAMMAR,
        zone::VolumeFixed::GRAMMAR,
        zone::VolumeAll::GRAMMAR,
        zone::MuteAll::GRAMMAR,
        zone::Source::GRAMMAR,
        zone::SourceAll::GRAMMAR,
        zone::Bass::GRAMMAR,
        zone::IncreaseBass::GRAMMAR,
        zone::DecreaseBass::GRAMMAR,
        zone::Treble::GRAMMAR,
        zone::IncreaseTreble::GRAMMAR,
        zone::DecreaseTreble::GRAMMAR,
        zone::Balance::GRAMMAR,
        zone::BalanceCenter::GRAMMAR,
        zone::IncreaseBalanceLeft::GRAMMAR,
        zone::IncreaseBalanceRight::GRAMMAR,
        zone::SoundMode::GRAMMAR,
        zone::HighpassCrossover::GRAMMAR,
        zone::LowpassCrossover::GRAMMAR,
        zone::BandLevel::GRAMMAR,
        zone::IncreaseBandLevel::GRAMMAR,
        zone::DecreaseBandLevel::GRAMMAR,
        zone::EqualizerPreset::GRAMMAR,
        group::QueryGroup::GRAMMAR,
        group::Name::GRAMMAR,
        group::AddZone::GRAMMAR,
        group::RemoveZone::GRAMMAR,
        group::Volume::GRAMMAR,
        group::IncreaseVolume::GRAMMAR,
        group::DecreaseVolume::GRAMMAR,
        group::Mute::GRAMMAR,
        group::ToggleMute::GRAMMAR,
        group::Source::GRAMMAR,
        source::QuerySource::GRAMMAR,
        source::Name::GRAMMAR,
        favorite::QueryFavorite::GRAMMAR,
        favorite::Name::GRAMMAR,
        equalizer::QueryPreset::GRAMMAR,
        equalizer::Name::GRAMMAR,
        equalizer::BandLevel::GRAMMAR,
        equalizer::IncreaseBandLevel::GRAMMAR,
        equalizer::DecreaseBandLevel::GRAMMAR,
        front_panel::QueryBrightness::GRAMMAR,
        front_panel::QueryLocked::GRAMMAR,
        front_panel::Brightness::GRAMMAR,
        front_panel::Locked::GRAMMAR,
        infrared::QueryDisabled::GRAMMAR,
        infrared::Disabled::GRAMMAR,
        network::QueryNetwork::GRAMMAR,
        network::Dhcp::GRAMMAR,
        network::Sddp::GRAMMAR,
        network::IpAddress::GRAMMAR,
        network::Netmask::GRAMMAR,
        network::Gateway::GRAMMAR,
        network::EthernetAddress::GRAMMAR,
        configuration::QueryConfiguration::GRAMMAR,
    ];
    for entry in grammar {
        check_command(entry)?;
    }

    let fixed = [
        configuration::LoadFromBackup::TEXT,
        configuration::SaveToBackup::TEXT,
        configuration::ResetToDefaults::TEXT,
        configuration::Saving::TEXT,
        ErrorFrame::TEXT,
    ];
    for text in fixed {
        check_fixed(text)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_verify_grammar() {
        assert!(verify_grammar().is_ok());
    }

    #[test]
    fn test_bad_table_entry_is_an_error_not_a_panic() {
        assert!(matches!(
            check_command((r"VO(\d+", 1)),
            Err(CodecError::InitializationFailed(_))
        ));
        assert!(matches!(
            check_command((r"VO(\d+),(-?\d+)", 1)),
            Err(CodecError::InitializationFailed(_))
        ));
    }

    #[test]
    fn test_error_frame() {
        assert_eq!(&ErrorFrame.encode()[..], b"ERROR\r\n");
        assert!(ErrorFrame::matches(b"ERROR"));
        assert!(!ErrorFrame::matches(b"(ERROR)"));
    }
}
