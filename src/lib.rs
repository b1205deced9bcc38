// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod backup;
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod csv_export;
pub mod db;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod month;
pub mod recurring;
pub mod report;
pub mod session;
pub mod store;
pub mod utils;
