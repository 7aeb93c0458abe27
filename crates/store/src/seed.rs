use chrono::{DateTime, Duration, Utc};
use launchpad_core::types::{Campaign, ProjectType, User};
use tracing::{info, warn};

use crate::MemoryStore;

impl MemoryStore {
    /// Sample users and one campaign per built-in project type, dated
    /// around `now`, for local runs of the engine.
    pub fn seed_demo_data(&self, now: DateTime<Utc>) {
        let users = [(1, "author"), (2, "alice"), (3, "bob"), (4, "carol")];
        for (id, username) in users {
            self.insert_user(User {
                id,
                username: username.to_string(),
                first_name: String::new(),
                last_name: String::new(),
                project_count: 0,
                success_rate: 0.0,
            });
        }

        let types = ProjectType::builtin();
        let goals = [(0, 300), (3, 900), (3, 0), (2, 0)];
        for (i, (project_type, (goal_people, goal_amount))) in types.iter().zip(goals).enumerate() {
            let id = i as i64 + 1;
            self.insert_campaign(Campaign {
                id,
                title: format!("{} demo", project_type.name),
                subtitle: project_type.alias.clone(),
                description: project_type.options.join(" "),
                release_date: now + Duration::days(7),
                event_date: None,
                goal_people,
                goal_amount,
                total: 0,
                flags: project_type.flags,
                published: true,
                locked: false,
                closed: false,
                owner_id: 1,
            });
        }

        for (user_id, campaign_id, payment) in [(2, 1, 150), (3, 1, 150), (2, 3, 0), (3, 3, 0), (4, 3, 0)] {
            if let Err(e) = self.create_donation(user_id, campaign_id, payment) {
                warn!(error = %e, "Failed to seed demo donation");
            }
        }

        info!(campaigns = types.len(), "Demo data seeded");
    }
}
