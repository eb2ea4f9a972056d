// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation engine. Everything here is a pure function over loaded
//! slices; nothing talks to storage.

pub mod biweekly;
pub mod cards;
pub mod categories;
pub mod payments;
pub mod portfolio;
pub mod summary;
