// Copyright 2026 Verdia Contributors
// SPDX-License-Identifier: Apache-2.0

//! Verdia library — plant-care assistant core.
//!
//! Capture a photo of a plant, send it to an external multimodal inference
//! service, get back a structured diagnosis, and keep a locally persisted
//! garden of saved plants. This library crate exposes the core modules for
//! integration testing; the `verdia` binary is the CLI front-end.

#![allow(clippy::new_without_default)]

pub mod capture;
pub mod cli;
pub mod config;
pub mod diagnosis;
pub mod garden;
pub mod tips;
