// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Transaction database layouts and their conversion.
//!
//! A mining run starts from a [`HorizontalDatabase`] (rows of attributes, the
//! natural input format) and stages it into a [`VerticalDatabase`] (one
//! tidset per attribute, the format the search intersects). Staging happens
//! exactly once per run, optionally filling a [`PairSupportMatrix`] in the
//! same pass.

pub mod horizontal;
pub mod pair_supports;
pub mod vertical;

pub use horizontal::HorizontalDatabase;
pub use pair_supports::PairSupportMatrix;
pub use vertical::{AttributeColumn, VerticalDatabase};
