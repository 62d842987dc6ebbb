//! Dialog updates

use lab_dashboard_core::{CoreError, CreationForm, InstanceStatus};

use super::notice_expiry;
use crate::message::ModalMessage;
use crate::model::{App, FormField, Modal, Tone};

pub fn update(app: &mut App, msg: ModalMessage) {
    let Some(modal) = app.modal.active.clone() else {
        return;
    };

    match modal {
        Modal::CreateInstance {
            focus,
            suggestion,
            show_errors,
        } => handle_create_instance(app, msg, focus, suggestion, show_errors),
        Modal::ConfirmDelete { domain_name, focus } => {
            handle_confirm_delete(app, msg, &domain_name, focus);
        }
        Modal::Help | Modal::Error { .. } => {
            if matches!(msg, ModalMessage::Close | ModalMessage::Confirm) {
                app.modal.close();
            }
        }
    }
}

fn close_creation(app: &mut App) {
    app.dialog.close();
    app.modal.close();
}

fn handle_create_instance(
    app: &mut App,
    msg: ModalMessage,
    mut focus: FormField,
    mut suggestion: usize,
    mut show_errors: bool,
) {
    if msg == ModalMessage::Close {
        close_creation(app);
        return;
    }

    match app.dialog.status() {
        // Input is frozen while the request is in flight
        InstanceStatus::Loading => return,
        InstanceStatus::Success | InstanceStatus::Error { .. } => {
            if msg == ModalMessage::Confirm {
                close_creation(app);
            }
            return;
        }
        InstanceStatus::Form => {}
    }

    let types = app.options.instance_types().to_vec();
    let Some(form) = app.dialog.form_mut() else {
        app.modal.close();
        return;
    };

    let mut submit = false;
    match msg {
        ModalMessage::NextField => {
            focus = focus.next();
            suggestion = 0;
        }
        ModalMessage::PrevField => {
            focus = focus.previous();
            suggestion = 0;
        }
        ModalMessage::Right if focus == FormField::InstanceType => {
            form.cycle_instance_type(&types);
        }
        ModalMessage::Left if focus == FormField::InstanceType => {
            let reversed: Vec<String> = types.iter().rev().cloned().collect();
            form.cycle_instance_type(&reversed);
        }
        ModalMessage::Up => match focus {
            FormField::Applications => suggestion = suggestion.saturating_sub(1),
            FormField::InstanceType => {
                let reversed: Vec<String> = types.iter().rev().cloned().collect();
                form.cycle_instance_type(&reversed);
            }
            _ => {}
        },
        ModalMessage::Down => match focus {
            FormField::Applications => {
                if suggestion + 1 < form.chips().filtered().len() {
                    suggestion += 1;
                }
            }
            FormField::InstanceType => {
                form.cycle_instance_type(&types);
            }
            _ => {}
        },
        ModalMessage::Input(c) => {
            input_char(form, focus, c, &types);
            suggestion = 0;
        }
        ModalMessage::Backspace => {
            if let Some(field) = focus.text_field() {
                form.pop_char(field);
            } else if focus == FormField::Applications {
                if form.chips().query().is_empty() {
                    form.chips_mut().remove_last();
                } else {
                    form.chips_mut().pop_char();
                }
                suggestion = 0;
            }
        }
        ModalMessage::Confirm => {
            if focus == FormField::Applications && !form.chips().filtered().is_empty() {
                let pick = form.chips().filtered().get(suggestion).cloned();
                if let Some(item) = pick {
                    form.chips_mut().select(&item);
                }
                suggestion = 0;
            } else {
                submit = true;
            }
        }
        ModalMessage::Submit => submit = true,
        ModalMessage::Left | ModalMessage::Right | ModalMessage::Close => {}
    }

    if submit {
        show_errors = true;
        submit_form(app);
    }

    if app.modal.is_create_instance() {
        app.modal.active = Some(Modal::CreateInstance {
            focus,
            suggestion,
            show_errors,
        });
    }
}

fn input_char(form: &mut CreationForm, focus: FormField, c: char, types: &[String]) {
    match focus {
        FormField::InstanceType => {
            if c == ' ' {
                form.cycle_instance_type(types);
            }
        }
        FormField::Applications => form.chips_mut().push_char(c),
        _ => {
            if focus.is_numeric() && !c.is_ascii_digit() {
                return;
            }
            if let Some(field) = focus.text_field() {
                form.push_char(field, c);
            }
        }
    }
}

fn submit_form(app: &mut App) {
    match app.dialog.submit() {
        Ok(()) => log::info!("Submitted new instance request"),
        Err(CoreError::Validation(reason)) => {
            log::debug!("Creation form rejected: {reason}");
            app.flash_status("Please fix the highlighted fields", Tone::Error, notice_expiry());
        }
        Err(e) => log::warn!("Submission refused: {e}"),
    }
}

fn handle_confirm_delete(app: &mut App, msg: ModalMessage, domain_name: &str, focus: usize) {
    match msg {
        ModalMessage::Close => app.modal.close(),
        ModalMessage::Left | ModalMessage::Right | ModalMessage::NextField => {
            app.modal.active = Some(Modal::ConfirmDelete {
                domain_name: domain_name.to_string(),
                focus: 1 - focus.min(1),
            });
        }
        ModalMessage::Confirm | ModalMessage::Input('y') => {
            let confirmed = focus == 1 || msg == ModalMessage::Input('y');
            app.modal.close();
            if confirmed && app.domains.delete(domain_name) {
                log::info!("Deleting domain '{domain_name}'");
                app.flash_status(format!("Deleting '{domain_name}'"), Tone::Info, notice_expiry());
            }
        }
        _ => {}
    }
}
