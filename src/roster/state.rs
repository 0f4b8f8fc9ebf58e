use crate::models::{Coach, CoachRequest, Player, SessionUser, SessionView};

/// Page state for the lineup view. Only changed through [`RosterState::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterState {
    pub user: Option<SessionUser>,
    pub is_admin: bool,
    pub pending_request: bool,
    pub players: Vec<Player>,
    pub coaches: Vec<Coach>,
    pub coach_requests: Vec<CoachRequest>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RosterEvent {
    SessionResolved(SessionView),
    SignedOut,
    PlayersLoaded(Vec<Player>),
    CoachesLoaded(Vec<Coach>),
    CoachRequestsLoaded(Vec<CoachRequest>),
    AccessRequested,
    Failed(String),
    NoticeDismissed,
}

impl RosterState {
    pub fn apply(&mut self, event: RosterEvent) {
        match event {
            RosterEvent::SessionResolved(session) => {
                let signed_in = session.user.is_some();
                self.user = session.user;
                self.is_admin = signed_in && session.is_admin;
                self.pending_request = signed_in && !self.is_admin && session.pending_request;
                if !self.is_admin {
                    self.coach_requests.clear();
                }
            }
            RosterEvent::SignedOut => {
                self.user = None;
                self.is_admin = false;
                self.pending_request = false;
                self.coach_requests.clear();
            }
            RosterEvent::PlayersLoaded(players) => self.players = players,
            RosterEvent::CoachesLoaded(coaches) => self.coaches = coaches,
            RosterEvent::CoachRequestsLoaded(requests) => self.coach_requests = requests,
            RosterEvent::AccessRequested => {
                if self.user.is_some() {
                    self.pending_request = true;
                }
            }
            RosterEvent::Failed(message) => self.notice = Some(message),
            RosterEvent::NoticeDismissed => self.notice = None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn can_request_access(&self) -> bool {
        self.is_signed_in() && !self.is_admin && !self.pending_request
    }

    pub fn shows_pending_requests(&self) -> bool {
        self.is_admin && !self.coach_requests.is_empty()
    }

    pub fn find_request(&self, id: i64) -> Option<&CoachRequest> {
        self.coach_requests.iter().find(|request| request.id == id)
    }
}
