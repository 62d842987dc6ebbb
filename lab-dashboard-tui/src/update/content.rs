//! Dashboard updates

use lab_dashboard_client::Lab;

use super::notice_expiry;
use crate::message::ContentMessage;
use crate::model::{App, Tone};

pub fn update(app: &mut App, msg: ContentMessage) {
    match msg {
        ContentMessage::SelectPrevious => {
            if app.focus.is_domains() {
                app.dashboard.select_previous();
            } else {
                app.dashboard.lab_previous();
            }
        }
        ContentMessage::SelectNext => {
            if app.focus.is_domains() {
                let len = app.domains.page_rows().len();
                app.dashboard.select_next(len);
            } else {
                let len = app.expanded_labs().len();
                app.dashboard.lab_next(len);
            }
        }
        ContentMessage::SelectFirst => app.dashboard.select_first(),
        ContentMessage::SelectLast => {
            let len = app.domains.page_rows().len();
            app.dashboard.select_last(len);
        }

        ContentMessage::Confirm => {
            if app.focus.is_domains() {
                toggle_selected_row(app);
            } else if let Some(lab) = app.selected_lab().map(|l| l.name.clone()) {
                app.domains.toggle_lab(&lab);
            }
        }

        ContentMessage::NewInstance => {
            app.dialog.open_new(&app.options);
            app.modal.show_create_instance();
        }
        ContentMessage::CloneInstance => {
            let source = app
                .selected_row()
                .and_then(|row| app.domains.clone_source(row.name()));
            if let Some(source) = source {
                app.dialog.open_clone(&source, &app.options);
                app.modal.show_create_instance();
            }
        }
        ContentMessage::Delete => {
            if let Some(name) = app.selected_row().map(|r| r.name().to_string()) {
                app.modal.show_confirm_delete(&name);
            }
        }

        ContentMessage::NextPage => {
            app.domains.next_page();
            app.dashboard.select_first();
        }
        ContentMessage::PreviousPage => {
            app.domains.previous_page();
            app.dashboard.select_first();
        }
        ContentMessage::CyclePageSize => {
            app.domains.cycle_page_size();
            app.dashboard.select_first();
            let size = app.domains.pagination().page_size();
            app.flash_status(format!("{size} rows per page"), Tone::Info, notice_expiry());
        }
        ContentMessage::SortBy(column) => {
            app.domains.sort_by(column);
        }

        ContentMessage::CopyLab => {
            if let Some(lab) = target_lab(app) {
                match app.backend.copy(&lab) {
                    Ok(feedback) => {
                        app.flash_status(feedback.message, Tone::Success, feedback.expires_at);
                    }
                    Err(e) => {
                        log::error!("Copy to clipboard failed: {e}");
                        app.set_status(e.to_string(), Tone::Error);
                    }
                }
            }
        }
        ContentMessage::DownloadLab => {
            let Some(lab_name) = app.selected_lab().map(|l| l.name.clone()) else {
                return;
            };
            if let Some(lab) = target_lab(app) {
                match app.backend.download(&lab, &lab_name) {
                    Ok(path) => app.flash_status(
                        format!("Saved {}", path.display()),
                        Tone::Success,
                        notice_expiry(),
                    ),
                    Err(e) => app.modal.show_error("Export failed", e.to_string()),
                }
            }
        }
    }
}

fn toggle_selected_row(app: &mut App) {
    let Some(name) = app.selected_row().map(|r| r.name().to_string()) else {
        return;
    };
    app.domains.toggle_expand(&name);
    app.dashboard.lab_selected = 0;
}

/// Details of the lab under the labs cursor, if they have arrived. Sets a
/// hint in the status bar otherwise.
fn target_lab(app: &mut App) -> Option<Lab> {
    let Some(name) = app.selected_lab().map(|l| l.name.clone()) else {
        app.flash_status("Expand a domain and select a lab first", Tone::Info, notice_expiry());
        return None;
    };
    if let Some(lab) = app.domains.lab(&name) {
        return Some(lab.clone());
    }
    let hint = if app.domains.is_lab_pending(&name) {
        format!("Details of '{name}' are still loading")
    } else {
        format!("Open '{name}' first (Enter in the labs panel)")
    };
    app.flash_status(hint, Tone::Info, notice_expiry());
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::AppMessage;
    use crate::model::{FocusPanel, Modal};
    use crate::test_utils::{domain, sample_lab, settle, test_app, test_app_in};
    use crate::update::update as dispatch;
    use lab_dashboard_core::SortColumn;
    use lab_dashboard_core::export::format_text;

    async fn loaded(app: &mut App) {
        dispatch(app, AppMessage::Refresh);
        settle().await;
        dispatch(app, AppMessage::Tick);
    }

    #[tokio::test]
    async fn enter_on_single_lab_domain_fetches_its_details() {
        let dir = tempfile::tempdir().unwrap();
        let (api, clipboard, mut app) = test_app_in(dir.path());
        *api.domains.lock().unwrap() = vec![domain("acme", 1, &["acme-1"])];
        loaded(&mut app).await;

        update(&mut app, ContentMessage::Confirm);
        assert_eq!(app.domains.expanded(), Some("acme"));
        assert!(app.domains.is_lab_open("acme-1"));
        settle().await;
        dispatch(&mut app, AppMessage::Tick);
        assert_eq!(app.domains.lab("acme-1"), Some(&sample_lab()));

        update(&mut app, ContentMessage::CopyLab);
        assert_eq!(
            clipboard.contents.lock().unwrap().as_deref(),
            Some(format_text(&sample_lab()).as_str())
        );
        let status = app.status_message.clone().unwrap();
        assert_eq!(status.tone, Tone::Success);
        assert!(status.expires_at.is_some());

        update(&mut app, ContentMessage::DownloadLab);
        let written = std::fs::read_to_string(dir.path().join("acme-1 Details")).unwrap();
        assert_eq!(written, format_text(&sample_lab()));
    }

    #[tokio::test]
    async fn copy_before_details_arrive_only_hints() {
        let (api, mut app) = test_app();
        *api.domains.lock().unwrap() = vec![domain("acme", 1, &["acme-1", "acme-2"])];
        loaded(&mut app).await;

        update(&mut app, ContentMessage::Confirm);
        assert!(!app.domains.is_lab_open("acme-1"));
        update(&mut app, ContentMessage::CopyLab);

        let status = app.status_message.clone().unwrap();
        assert_eq!(status.tone, Tone::Info);
        assert!(status.text.contains("acme-1"));
    }

    #[tokio::test]
    async fn labs_panel_opens_selected_lab() {
        let (api, mut app) = test_app();
        *api.domains.lock().unwrap() = vec![domain("acme", 1, &["acme-1", "acme-2"])];
        loaded(&mut app).await;

        update(&mut app, ContentMessage::Confirm);
        app.focus = FocusPanel::Labs;
        update(&mut app, ContentMessage::SelectNext);
        update(&mut app, ContentMessage::Confirm);

        assert!(app.domains.is_lab_open("acme-2"));
        assert!(app.domains.is_lab_pending("acme-2"));
    }

    #[tokio::test]
    async fn delete_asks_for_confirmation() {
        let (api, mut app) = test_app();
        *api.domains.lock().unwrap() = vec![domain("acme", 1, &[])];
        loaded(&mut app).await;

        update(&mut app, ContentMessage::Delete);

        assert_eq!(
            app.modal.active,
            Some(Modal::ConfirmDelete {
                domain_name: "acme".into(),
                focus: 0
            })
        );
        assert!(api.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn clone_opens_prefilled_form() {
        let (api, mut app) = test_app();
        *api.domains.lock().unwrap() = vec![domain("acme", 1, &[])];
        loaded(&mut app).await;

        update(&mut app, ContentMessage::CloneInstance);

        assert!(app.modal.is_create_instance());
        let form = app.dialog.form().unwrap();
        assert_eq!(form.title(), "Clone Instance");
        assert!(form.is_type_locked());
        assert_eq!(form.instance_type(), "Detection");
        assert_eq!(form.chips().selected(), ["Crapi"]);
    }

    #[tokio::test]
    async fn sorting_and_paging() {
        let (api, mut app) = test_app();
        *api.domains.lock().unwrap() = (1..=12)
            .map(|day| domain(&format!("d{day:02}"), day, &[]))
            .collect();
        loaded(&mut app).await;
        assert_eq!(app.domains.page_rows().len(), 10);

        update(&mut app, ContentMessage::SortBy(SortColumn::Name));
        update(&mut app, ContentMessage::SortBy(SortColumn::Name));
        assert_eq!(app.domains.page_rows()[0].name(), "d12");

        update(&mut app, ContentMessage::NextPage);
        assert_eq!(app.domains.page_rows().len(), 2);
        assert_eq!(app.dashboard.selected, 0);

        update(&mut app, ContentMessage::CyclePageSize);
        assert_eq!(app.domains.pagination().page_size(), 25);
        assert_eq!(app.domains.page_rows().len(), 12);
    }
}
