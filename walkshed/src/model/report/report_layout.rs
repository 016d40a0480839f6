use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::ReportError;

/// fixed row/column structure of the report grid. rows and columns are 1-based,
/// row 1 is the header, columns 1 and 2 hold the location and profile labels.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportLayout {
    /// number of rows reserved for each location
    pub block_size: usize,
    pub first_category_column: usize,
    pub last_category_column: usize,
}

pub const LOCATION_COLUMN: usize = 1;
pub const PROFILE_COLUMN: usize = 2;
pub const HEADER_ROW: usize = 1;

impl ReportLayout {
    /// row of a (location, profile) cell: `location_index * block_size + 1 + profile_rank`
    pub fn row(&self, location_index: usize, profile_rank: usize) -> usize {
        location_index * self.block_size + 1 + profile_rank
    }

    pub fn category_columns(&self) -> RangeInclusive<usize> {
        self.first_category_column..=self.last_category_column
    }

    pub fn category_capacity(&self) -> usize {
        self.last_category_column + 1 - self.first_category_column
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.block_size < 2 {
            return Err(ReportError::InvalidLayout(format!(
                "block size {} leaves no room for profile rows",
                self.block_size
            )));
        }
        if self.first_category_column <= PROFILE_COLUMN {
            return Err(ReportError::InvalidLayout(format!(
                "category columns must start after the profile column, found {}",
                self.first_category_column
            )));
        }
        if self.last_category_column < self.first_category_column {
            return Err(ReportError::InvalidLayout(format!(
                "category columns {}..={} are empty",
                self.first_category_column, self.last_category_column
            )));
        }
        Ok(())
    }
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            block_size: 6,
            first_category_column: 3,
            last_category_column: 7,
        }
    }
}
