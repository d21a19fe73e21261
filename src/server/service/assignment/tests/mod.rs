
use portal_test_utils::prelude::*;

use crate::{
    model::status::Visibility,
    server::service::assignment::{AssignOutcome, AssignmentService},
};
