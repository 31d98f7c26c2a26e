// SPDX-License-Identifier: MPL-2.0
//! Iced widgets for the magnifier.

pub mod overlay;
