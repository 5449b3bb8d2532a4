// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Deserializer};

/// Distinguishes an explicit `null` from an absent field when paired with
/// `#[serde(default)]` on an `Option<Option<T>>`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
	T: Deserialize<'de>,
	D: Deserializer<'de>,
{
	T::deserialize(deserializer).map(Some)
}
