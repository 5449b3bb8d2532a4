// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Column decoding shared by the repositories.
//!
//! IDs are stored as UUID strings, timestamps as RFC 3339 text and choice
//! enums as their wire strings.

use chrono::{DateTime, NaiveDate, Utc};
use softdesk_server_auth::ParseChoiceError;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DbError;

pub(crate) fn parse_id<T: From<Uuid>>(value: &str, column: &str) -> Result<T, DbError> {
	Uuid::parse_str(value)
		.map(T::from)
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

pub(crate) fn parse_optional_id<T: From<Uuid>>(
	value: Option<String>,
	column: &str,
) -> Result<Option<T>, DbError> {
	value.map(|v| parse_id(&v, column)).transpose()
}

pub(crate) fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

pub(crate) fn parse_date(value: &str, column: &str) -> Result<NaiveDate, DbError> {
	NaiveDate::parse_from_str(value, "%Y-%m-%d")
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

pub(crate) fn parse_choice<T>(value: &str) -> Result<T, DbError>
where
	T: FromStr<Err = ParseChoiceError>,
{
	value
		.parse()
		.map_err(|e: ParseChoiceError| DbError::Internal(e.to_string()))
}
