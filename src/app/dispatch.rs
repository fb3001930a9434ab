use crate::cli::{Cli, Commands};
use crate::nav::Screen;
use crate::poll::ConnectionStatus;
use crate::view::{Controller, GoalForm};
use anyhow::Result;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::time::Duration;

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn show_header(controller: &Controller, screen: Screen) {
    let (title, subtitle) = screen.header();
    controller.renderer().set_header(title, subtitle);
}

/// Run one CLI command. Controller failures have already been shown to the
/// user as notifications, so they only turn into a failing exit code here.
pub async fn dispatch(cli: Cli, controller: Arc<Controller>) -> Result<ExitCode> {
    let command = cli.command.unwrap_or(Commands::Dashboard);

    let ok = match command {
        Commands::Dashboard => {
            show_header(&controller, Screen::Dashboard);
            controller.refresh_dashboard().await.all_ok()
        }

        Commands::Goal {
            goal,
            deadline,
            email,
            autonomy,
        } => {
            show_header(&controller, Screen::Goal);
            let form = GoalForm {
                goal: goal.join(" "),
                deadline,
                email,
                autonomy,
            };
            controller.submit_goal(form).await.is_ok()
        }

        Commands::Approve { task_ids } => controller.approve(&task_ids).await.is_ok(),

        Commands::Today { raw_status } => {
            show_header(&controller, Screen::Today);
            let today = controller.refresh_today().await.is_ok();
            if raw_status {
                controller.load_task_status().await.is_ok() && today
            } else {
                today
            }
        }

        Commands::Done { task_id } => controller.toggle_task(&task_id, true).await.is_ok(),

        Commands::Undo { task_id } => controller.toggle_task(&task_id, false).await.is_ok(),

        Commands::Review => {
            show_header(&controller, Screen::Review);
            // An absent review is a normal state, not a failure.
            controller.load_weekly_review().await;
            true
        }

        Commands::Log { session } => {
            show_header(&controller, Screen::Log);
            controller.load_action_log(session.as_deref()).await.is_ok()
        }

        Commands::Sessions => controller.load_sessions().await.is_ok(),

        Commands::Health => controller.check_health().await.is_ok(),

        Commands::Settings {
            api_base,
            autonomy,
            clear_session,
        } => {
            show_header(&controller, Screen::Settings);
            let mut ok = true;
            if clear_session {
                ok &= controller.clear_session().is_ok();
            }
            if api_base.is_some() || autonomy.is_some() {
                ok &= controller
                    .save_settings(api_base.as_deref(), autonomy.as_deref())
                    .is_ok();
            } else if !clear_session {
                controller.show_settings();
            }
            ok
        }

        Commands::Status => {
            controller.check_connectivity().await == ConnectionStatus::Connected
        }

        Commands::Login => {
            println!("{}", controller.show_login());
            true
        }

        Commands::Shell { poll_secs } => {
            super::shell::run_shell(controller, Duration::from_secs(poll_secs)).await?;
            true
        }
    };

    Ok(exit_code(ok))
}
