// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire command decoding.
//!
//! Inbound bus messages arrive on one of three command channels; this
//! module turns a channel plus raw payload into a typed [`Command`] or a
//! named discard reason. Decoding is strict: anything that is not a valid
//! percentage or a known preset code/keyword is rejected, never clamped.

use crate::error::InvalidCommand;
use crate::types::{Percentage, Preset};

/// The command channel an inbound message arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandChannel {
    /// The on/off channel; accepts preset codes and keywords.
    Power,
    /// The percentage channel; accepts integers 0-100 only.
    Speed,
    /// The preset channel; accepts preset codes and keywords.
    Mode,
}

impl CommandChannel {
    /// Returns a short name for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Speed => "speed",
            Self::Mode => "mode",
        }
    }
}

/// A single input event for the reconciler.
///
/// Commands are transient: constructed per received event and consumed
/// immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set the fan to an arbitrary percentage.
    Percentage(Percentage),
    /// Set the fan to a discrete preset.
    Preset(Preset),
    /// A physical button changed state. The value is the sampled level
    /// code: 0-3 for the three-button layout (0 means all released); the
    /// one-button layout always reports 0 and the reconciler advances
    /// cyclically instead of reading it.
    ButtonEdge(u8),
}

impl Command {
    /// Decodes a raw payload received on `channel`.
    ///
    /// Numeric payloads tolerate surrounding whitespace; keyword payloads
    /// must match a preset alias exactly. The speed channel takes only
    /// integers within [0, 100] — keywords there are rejected, as are
    /// numbers on the power/mode channels that name no preset code.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidCommand`] naming why the payload is unusable;
    /// callers discard such messages without touching the output.
    pub fn decode(channel: CommandChannel, payload: &[u8]) -> Result<Self, InvalidCommand> {
        let text = std::str::from_utf8(payload).map_err(|_| InvalidCommand::NotUtf8)?;
        match channel {
            CommandChannel::Speed => {
                let value: i64 = text
                    .trim()
                    .parse()
                    .map_err(|_| InvalidCommand::NotNumeric(text.to_string()))?;
                let byte =
                    u8::try_from(value).map_err(|_| InvalidCommand::PercentageOutOfRange(value))?;
                let percentage = Percentage::new(byte)
                    .map_err(|_| InvalidCommand::PercentageOutOfRange(value))?;
                Ok(Self::Percentage(percentage))
            }
            CommandChannel::Power | CommandChannel::Mode => {
                if let Ok(code) = text.trim().parse::<i64>() {
                    u8::try_from(code)
                        .ok()
                        .and_then(Preset::from_code)
                        .map(Self::Preset)
                        .ok_or(InvalidCommand::UnknownPresetCode(code))
                } else {
                    Preset::from_keyword(text)
                        .map(Self::Preset)
                        .ok_or_else(|| InvalidCommand::UnknownPresetKeyword(text.to_string()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_channel_accepts_percentages() {
        let cmd = Command::decode(CommandChannel::Speed, b"50").unwrap();
        assert_eq!(cmd, Command::Percentage(Percentage::new(50).unwrap()));

        let cmd = Command::decode(CommandChannel::Speed, b" 100 ").unwrap();
        assert_eq!(cmd, Command::Percentage(Percentage::FULL));

        let cmd = Command::decode(CommandChannel::Speed, b"0").unwrap();
        assert_eq!(cmd, Command::Percentage(Percentage::ZERO));
    }

    #[test]
    fn speed_channel_rejects_out_of_range() {
        assert_eq!(
            Command::decode(CommandChannel::Speed, b"101"),
            Err(InvalidCommand::PercentageOutOfRange(101))
        );
        assert_eq!(
            Command::decode(CommandChannel::Speed, b"-1"),
            Err(InvalidCommand::PercentageOutOfRange(-1))
        );
    }

    #[test]
    fn speed_channel_rejects_keywords() {
        assert_eq!(
            Command::decode(CommandChannel::Speed, b"low"),
            Err(InvalidCommand::NotNumeric("low".to_string()))
        );
    }

    #[test]
    fn speed_channel_rejects_non_utf8() {
        assert_eq!(
            Command::decode(CommandChannel::Speed, &[0xff, 0xfe]),
            Err(InvalidCommand::NotUtf8)
        );
    }

    #[test]
    fn mode_channel_accepts_codes() {
        let cmd = Command::decode(CommandChannel::Mode, b"2").unwrap();
        assert_eq!(cmd, Command::Preset(Preset::Medium));

        let cmd = Command::decode(CommandChannel::Mode, b"0").unwrap();
        assert_eq!(cmd, Command::Preset(Preset::Off));
    }

    #[test]
    fn mode_channel_accepts_keywords() {
        let cmd = Command::decode(CommandChannel::Mode, b"high").unwrap();
        assert_eq!(cmd, Command::Preset(Preset::High));
    }

    #[test]
    fn mode_channel_rejects_unknown_codes() {
        assert_eq!(
            Command::decode(CommandChannel::Mode, b"50"),
            Err(InvalidCommand::UnknownPresetCode(50))
        );
        assert_eq!(
            Command::decode(CommandChannel::Mode, b"-2"),
            Err(InvalidCommand::UnknownPresetCode(-2))
        );
    }

    #[test]
    fn power_channel_accepts_hub_strings() {
        let cmd = Command::decode(CommandChannel::Power, b"ON").unwrap();
        assert_eq!(cmd, Command::Preset(Preset::High));

        let cmd = Command::decode(CommandChannel::Power, b"OFF").unwrap();
        assert_eq!(cmd, Command::Preset(Preset::Off));
    }

    #[test]
    fn keyword_matching_is_exact() {
        assert_eq!(
            Command::decode(CommandChannel::Mode, b" off"),
            Err(InvalidCommand::UnknownPresetKeyword(" off".to_string()))
        );
        assert_eq!(
            Command::decode(CommandChannel::Power, b"On"),
            Err(InvalidCommand::UnknownPresetKeyword("On".to_string()))
        );
    }
}
