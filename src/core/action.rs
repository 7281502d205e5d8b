//! # Actions
//!
//! Everything that can happen in pubdash becomes an `Action`.
//! User presses Enter on the Sender view? That's `Action::Submit`.
//! A list request comes back? That's `Action::ListLoaded { seq, result }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the effects the runtime should perform. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  State' + [Effect]
//! ```

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::api::{ApiError, MessagePage, MessageRecord, PublishReceipt, PublishRequest};
use crate::core::listing::{ReloadOutcome, ReloadTicket};
use crate::core::state::{AfterPublish, App, View};

#[derive(Debug, Clone)]
pub enum Action {
    /// The dashboard came up: first load, and start polling if enabled.
    Mount,
    Submit,
    PublishFinished {
        request: PublishRequest,
        result: Result<PublishReceipt, ApiError>,
        finished_at: DateTime<Utc>,
    },
    Search,
    ClearFilters,
    NextPage,
    PrevPage,
    ToggleAutoRefresh,
    RefreshTick,
    ListLoaded {
        seq: u64,
        result: Result<MessagePage, ApiError>,
    },
    SwitchView(View),
    Quit,
}

/// Side effects requested by `update()`, executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Publish(PublishRequest),
    Reload(ReloadTicket),
    StartAutoRefresh,
    StopAutoRefresh,
    Quit,
}

const LOAD_FAILED: &str = "Failed to load messages";

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Mount => {
            let mut effects = vec![reload(app)];
            if app.list.auto_refresh {
                effects.push(Effect::StartAutoRefresh);
            }
            effects
        }

        Action::Submit => match app.composer.begin_submit(&app.source) {
            Some(request) => {
                app.status_message = String::from("Sending...");
                vec![Effect::Publish(request)]
            }
            None => {
                debug!("Submit ignored (busy={})", app.composer.busy);
                vec![]
            }
        },

        Action::PublishFinished {
            request,
            result,
            finished_at,
        } => {
            app.composer.finish_submit(&result);
            match result {
                Ok(receipt) => {
                    app.status_message = String::from("Published");
                    match app.after_publish {
                        AfterPublish::Echo => {
                            let record = MessageRecord::local_echo(
                                &receipt,
                                &request.text,
                                &request.source,
                                finished_at,
                            );
                            app.list.prepend_local(record);
                            vec![]
                        }
                        AfterPublish::Reload => vec![reload(app)],
                    }
                }
                Err(e) => {
                    info!("Publish failed: {}", e);
                    app.status_message = String::from("Send failed");
                    vec![]
                }
            }
        }

        Action::Search => {
            app.list.page = 1;
            vec![reload(app)]
        }

        Action::ClearFilters => {
            app.list.clear_filters();
            vec![reload(app)]
        }

        Action::NextPage => {
            if app.list.next_page() {
                vec![reload(app)]
            } else {
                vec![]
            }
        }

        Action::PrevPage => {
            if app.list.prev_page() {
                vec![reload(app)]
            } else {
                vec![]
            }
        }

        Action::ToggleAutoRefresh => {
            app.list.auto_refresh = !app.list.auto_refresh;
            if app.list.auto_refresh {
                app.status_message = String::from("Auto refresh on");
                vec![Effect::StartAutoRefresh, reload(app)]
            } else {
                app.status_message = String::from("Auto refresh off");
                vec![Effect::StopAutoRefresh]
            }
        }

        Action::RefreshTick => {
            // A tick can still be queued when polling was just switched off.
            if app.list.auto_refresh {
                vec![reload(app)]
            } else {
                vec![]
            }
        }

        Action::ListLoaded { seq, result } => {
            let failed = result.is_err();
            match app.list.apply_reload(seq, result) {
                ReloadOutcome::Stale => {
                    debug!("Discarding stale list result seq={}", seq);
                    vec![]
                }
                ReloadOutcome::Clamped => vec![reload(app)],
                ReloadOutcome::Applied => {
                    if failed {
                        app.status_message = String::from(LOAD_FAILED);
                    } else if app.status_message == LOAD_FAILED {
                        app.status_message = format!("Loaded {} messages", app.list.total);
                    }
                    vec![]
                }
            }
        }

        Action::SwitchView(view) => {
            app.view = view;
            vec![]
        }

        Action::Quit => vec![Effect::Quit],
    }
}

fn reload(app: &mut App) -> Effect {
    Effect::Reload(app.list.begin_reload())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DuplicateFilter, ListQuery};
    use serde_json::json;

    fn app() -> App {
        App::new(10, true)
    }

    fn page(n: usize, total: u64) -> MessagePage {
        MessagePage {
            items: (0..n)
                .map(|i| serde_json::from_value(json!({"messageId": format!("m{i}")})).unwrap())
                .collect(),
            total,
        }
    }

    fn reload_ticket(effects: &[Effect]) -> &ReloadTicket {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Reload(t) => Some(t),
                _ => None,
            })
            .expect("expected a reload effect")
    }

    fn finish_ok(app: &mut App, request: PublishRequest, receipt: PublishReceipt) -> Vec<Effect> {
        update(
            app,
            Action::PublishFinished {
                request,
                result: Ok(receipt),
                finished_at: Utc::now(),
            },
        )
    }

    #[test]
    fn test_mount_loads_and_starts_polling() {
        let mut app = app();
        let effects = update(&mut app, Action::Mount);
        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[0], Effect::Reload(_)));
        assert_eq!(effects[1], Effect::StartAutoRefresh);

        let mut quiet = App::new(10, false);
        let effects = update(&mut quiet, Action::Mount);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_blank_submit_has_no_effect() {
        let mut app = app();
        app.composer.text = "   ".into();
        assert!(update(&mut app, Action::Submit).is_empty());
    }

    #[test]
    fn test_submit_while_busy_has_no_effect() {
        let mut app = app();
        app.composer.text = "hello".into();
        assert_eq!(update(&mut app, Action::Submit).len(), 1);
        assert!(update(&mut app, Action::Submit).is_empty());
    }

    #[test]
    fn test_publish_reload_mode_reloads() {
        let mut app = app();
        app.composer.text = "hello".into();
        let Effect::Publish(request) = update(&mut app, Action::Submit).remove(0) else {
            panic!("expected publish");
        };
        let effects = finish_ok(&mut app, request, PublishReceipt::default());
        assert!(matches!(effects.as_slice(), [Effect::Reload(_)]));
        assert!(!app.composer.busy);
        assert!(app.composer.text.is_empty());
    }

    #[test]
    fn test_publish_echo_mode_prepends() {
        let mut app = app();
        app.after_publish = AfterPublish::Echo;
        app.composer.text = "hello".into();
        let Effect::Publish(request) = update(&mut app, Action::Submit).remove(0) else {
            panic!("expected publish");
        };
        let receipt = PublishReceipt {
            message_id: Some("77".into()),
            text: Some("h***o".into()),
            ..Default::default()
        };
        let effects = finish_ok(&mut app, request, receipt);
        assert!(effects.is_empty());
        assert_eq!(app.list.records.len(), 1);
        assert_eq!(app.list.records[0].text(), "h***o");
        assert_eq!(app.list.records[0].message_id().as_deref(), Some("77"));
    }

    #[test]
    fn test_publish_failure_keeps_list_untouched() {
        let mut app = app();
        app.composer.text = "hello".into();
        let Effect::Publish(request) = update(&mut app, Action::Submit).remove(0) else {
            panic!("expected publish");
        };
        let effects = update(
            &mut app,
            Action::PublishFinished {
                request,
                result: Err(ApiError::Network("refused".into())),
                finished_at: Utc::now(),
            },
        );
        assert!(effects.is_empty());
        assert!(!app.composer.busy);
        assert_eq!(app.status_message, "Send failed");
    }

    #[test]
    fn test_clear_filters_reloads_once_with_bare_query() {
        let mut app = app();
        app.list.filters.source = "ui".into();
        app.list.filters.duplicate = DuplicateFilter::True;
        app.list.total = 50;
        app.list.page = 4;

        let effects = update(&mut app, Action::ClearFilters);
        assert_eq!(effects.len(), 1);
        let ticket = reload_ticket(&effects);
        assert_eq!(
            ticket.query,
            ListQuery {
                filters: Default::default(),
                page: 1,
                limit: 10
            }
        );
        assert_eq!(ticket.query.pairs().len(), 2);
    }

    #[test]
    fn test_search_resets_page() {
        let mut app = app();
        app.list.total = 50;
        app.list.page = 3;
        app.list.filters.text = "hi".into();
        let effects = update(&mut app, Action::Search);
        assert_eq!(reload_ticket(&effects).query.page, 1);
        assert_eq!(reload_ticket(&effects).query.filters.text, "hi");
    }

    #[test]
    fn test_paging_only_reloads_within_bounds() {
        let mut app = app();
        let ticket = reload_ticket(&update(&mut app, Action::Mount)).clone();
        update(
            &mut app,
            Action::ListLoaded {
                seq: ticket.seq,
                result: Ok(page(10, 25)),
            },
        );

        assert!(update(&mut app, Action::PrevPage).is_empty());
        assert_eq!(reload_ticket(&update(&mut app, Action::NextPage)).query.page, 2);
        assert_eq!(reload_ticket(&update(&mut app, Action::NextPage)).query.page, 3);
        assert!(update(&mut app, Action::NextPage).is_empty());
        assert_eq!(app.list.page, 3);
    }

    #[test]
    fn test_toggle_auto_refresh() {
        let mut app = app();
        let effects = update(&mut app, Action::ToggleAutoRefresh);
        assert_eq!(effects, vec![Effect::StopAutoRefresh]);
        assert!(update(&mut app, Action::RefreshTick).is_empty());

        let effects = update(&mut app, Action::ToggleAutoRefresh);
        assert_eq!(effects[0], Effect::StartAutoRefresh);
        assert!(matches!(effects[1], Effect::Reload(_)));
        assert_eq!(update(&mut app, Action::RefreshTick).len(), 1);
    }

    // Overlapping reloads are sequence-stamped: the newest issued request wins.
    #[test]
    fn test_out_of_order_results_keep_latest() {
        let mut app = app();
        let older = reload_ticket(&update(&mut app, Action::Search)).clone();
        let newer = reload_ticket(&update(&mut app, Action::RefreshTick)).clone();

        update(
            &mut app,
            Action::ListLoaded {
                seq: newer.seq,
                result: Ok(page(1, 1)),
            },
        );
        let effects = update(
            &mut app,
            Action::ListLoaded {
                seq: older.seq,
                result: Ok(page(5, 5)),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(app.list.total, 1);
    }

    #[test]
    fn test_list_failure_sets_status() {
        let mut app = app();
        let ticket = reload_ticket(&update(&mut app, Action::Mount)).clone();
        update(
            &mut app,
            Action::ListLoaded {
                seq: ticket.seq,
                result: Err(ApiError::Network("down".into())),
            },
        );
        assert!(app.list.records.is_empty());
        assert_eq!(app.list.total, 0);
        assert_eq!(app.status_message, "Failed to load messages");
    }

    #[test]
    fn test_failed_load_on_last_page_then_prev_page() {
        let mut app = app();
        let ticket = reload_ticket(&update(&mut app, Action::Mount)).clone();
        update(
            &mut app,
            Action::ListLoaded {
                seq: ticket.seq,
                result: Ok(page(10, 25)),
            },
        );
        update(&mut app, Action::NextPage);
        let ticket = reload_ticket(&update(&mut app, Action::NextPage)).clone();
        assert_eq!(app.list.page, 3);

        update(
            &mut app,
            Action::ListLoaded {
                seq: ticket.seq,
                result: Err(ApiError::Network("down".into())),
            },
        );
        assert_eq!(app.list.page, 1);
        assert!(update(&mut app, Action::PrevPage).is_empty());
        assert_eq!(app.list.page, 1);
    }

    #[test]
    fn test_successful_load_clears_failure_status() {
        let mut app = app();
        let ticket = reload_ticket(&update(&mut app, Action::Mount)).clone();
        update(
            &mut app,
            Action::ListLoaded {
                seq: ticket.seq,
                result: Err(ApiError::Timeout),
            },
        );
        assert_eq!(app.status_message, "Failed to load messages");

        let ticket = reload_ticket(&update(&mut app, Action::RefreshTick)).clone();
        update(
            &mut app,
            Action::ListLoaded {
                seq: ticket.seq,
                result: Ok(page(3, 3)),
            },
        );
        assert_eq!(app.status_message, "Loaded 3 messages");
    }

    #[test]
    fn test_successful_load_keeps_publish_status() {
        let mut app = app();
        app.status_message = String::from("Published");
        let ticket = reload_ticket(&update(&mut app, Action::Search)).clone();
        update(
            &mut app,
            Action::ListLoaded {
                seq: ticket.seq,
                result: Ok(page(1, 1)),
            },
        );
        assert_eq!(app.status_message, "Published");
    }

    #[test]
    fn test_quit() {
        assert_eq!(update(&mut app(), Action::Quit), vec![Effect::Quit]);
    }
}
