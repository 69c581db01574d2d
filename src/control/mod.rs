// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command resolution and reconciliation.
//!
//! [`SpeedCurve`] turns percentages and presets into resolved output
//! targets; [`CommandReconciler`] is the state machine that feeds those
//! targets to the actuator and the status publisher.

mod curve;
mod reconciler;

pub use curve::SpeedCurve;
pub use reconciler::CommandReconciler;
