use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type CampaignId = i64;
pub type DonationId = i64;
pub type UserId = i64;

/// The three capability flags a campaign inherits from its project type.
///
/// Exactly four of the eight combinations map to a completion strategy;
/// see `launchpad_strategy::resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalFlags {
    pub goal_by_people: bool,
    pub goal_by_amount: bool,
    pub end_by_goal_gain: bool,
}

impl GoalFlags {
    pub const fn new(goal_by_people: bool, goal_by_amount: bool, end_by_goal_gain: bool) -> Self {
        Self {
            goal_by_people,
            goal_by_amount,
            end_by_goal_gain,
        }
    }
}

impl std::fmt::Display for GoalFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "goal_by_people={} goal_by_amount={} end_by_goal_gain={}",
            self.goal_by_people, self.goal_by_amount, self.end_by_goal_gain
        )
    }
}

/// A campaign type as presented to campaign authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectType {
    pub id: i64,
    pub alias: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(flatten)]
    pub flags: GoalFlags,
}

impl ProjectType {
    /// The four campaign types shipped with the platform.
    pub fn builtin() -> Vec<ProjectType> {
        vec![
            ProjectType {
                id: 1,
                alias: "money_fast".into(),
                name: "Campaign".into(),
                options: vec![
                    "Partakers deposit an arbitrary amount.".into(),
                    "When the required amount is reached, the campaign stops.".into(),
                    "Successful once the author has marked all money transfers.".into(),
                ],
                flags: GoalFlags::new(false, true, true),
            },
            ProjectType {
                id: 2,
                alias: "money_equal".into(),
                name: "Fair campaign".into(),
                options: vec![
                    "Partakers agree to split the amount among themselves.".into(),
                    "The minimum number of partakers must be recruited.".into(),
                    "Fundraising starts on the date specified by the author.".into(),
                ],
                flags: GoalFlags::new(true, true, false),
            },
            ProjectType {
                id: 3,
                alias: "event_fast".into(),
                name: "Event".into(),
                options: vec![
                    "Partakers agree to participate in the event.".into(),
                    "Successful when the required number of partakers is reached.".into(),
                ],
                flags: GoalFlags::new(true, false, true),
            },
            ProjectType {
                id: 4,
                alias: "event_overflow".into(),
                name: "Event+".into(),
                options: vec![
                    "Partakers agree to participate in the event.".into(),
                    "The number of partakers is not limited.".into(),
                    "Successful if enough people have gathered on the event date.".into(),
                ],
                flags: GoalFlags::new(true, false, false),
            },
        ]
    }
}

/// Derived lifecycle stage of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Search,
    Harvest,
    Success,
    Fail,
}

impl CampaignStatus {
    /// Status is a pure function of the three lifecycle flags. An
    /// unpublished campaign is a draft whatever its other flags say.
    pub fn from_flags(published: bool, closed: bool, locked: bool) -> Self {
        match (published, closed, locked) {
            (false, _, _) => CampaignStatus::Draft,
            (true, true, true) => CampaignStatus::Success,
            (true, true, false) => CampaignStatus::Fail,
            (true, false, true) => CampaignStatus::Harvest,
            (true, false, false) => CampaignStatus::Search,
        }
    }

    /// Success and Fail are terminal; the sweep never selects them again.
    pub fn is_terminal(self) -> bool {
        matches!(self, CampaignStatus::Success | CampaignStatus::Fail)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Search => "search",
            CampaignStatus::Harvest => "harvest",
            CampaignStatus::Success => "success",
            CampaignStatus::Fail => "fail",
        }
    }
}

/// A crowdfunded campaign ("project").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    pub release_date: DateTime<Utc>,
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub goal_people: i64,
    #[serde(default)]
    pub goal_amount: i64,
    /// Engine-owned progress. Always a full recomputation from donations.
    #[serde(default)]
    pub total: i64,
    #[serde(flatten)]
    pub flags: GoalFlags,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub closed: bool,
    pub owner_id: UserId,
}

impl Campaign {
    pub fn status(&self) -> CampaignStatus {
        CampaignStatus::from_flags(self.published, self.closed, self.locked)
    }

    /// Published and still open: the sweep re-checks it daily.
    pub fn is_active(&self) -> bool {
        self.published && !self.closed
    }

    pub fn release_day(&self) -> NaiveDate {
        self.release_date.date_naive()
    }
}

/// A pledge toward a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub id: DonationId,
    /// Money for amount-goal campaigns; ignored for people-goal campaigns.
    #[serde(default)]
    pub payment: i64,
    /// Mirrors the campaign lock. A locked donation can only be marked paid.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub paid: bool,
    pub user_id: UserId,
    pub campaign_id: CampaignId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Derived: recomputed from grouped campaign outcomes.
    #[serde(default)]
    pub project_count: i64,
    /// Derived: successes over closed campaigns, two decimal places.
    #[serde(default)]
    pub success_rate: f64,
}

/// One row of a user's published campaigns grouped by lifecycle flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectGroup {
    pub count: i64,
    pub closed: bool,
    pub locked: bool,
}
