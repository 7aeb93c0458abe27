use launchpad_core::types::GoalFlags;
use launchpad_core::{LifecycleError, LifecycleResult};

use crate::{EventDateStrategy, EventStrategy, MoneyEqualStrategy, MoneyStrategy, Strategy};

/// Picks the completion strategy for a project type's capability flags.
///
/// | amount | people | end by gain | strategy   |
/// |--------|--------|-------------|------------|
/// | yes    | no     | yes         | Money      |
/// | no     | yes    | yes         | Event      |
/// | no     | yes    | no          | EventDate  |
/// | yes    | yes    | no          | MoneyEqual |
///
/// Any other combination is rejected with `NoStrategy`.
pub fn resolve(flags: GoalFlags) -> LifecycleResult<Strategy> {
    let GoalFlags {
        goal_by_people,
        goal_by_amount,
        end_by_goal_gain,
    } = flags;

    match (goal_by_amount, goal_by_people, end_by_goal_gain) {
        (true, false, true) => Ok(Strategy::Money(MoneyStrategy)),
        (false, true, true) => Ok(Strategy::Event(EventStrategy)),
        (false, true, false) => Ok(Strategy::EventDate(EventDateStrategy::default())),
        (true, true, false) => Ok(Strategy::MoneyEqual(MoneyEqualStrategy::default())),
        _ => Err(LifecycleError::NoStrategy { flags }),
    }
}
