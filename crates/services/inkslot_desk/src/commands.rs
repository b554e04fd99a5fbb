// --- File: crates/services/inkslot_desk/src/commands.rs ---
use crate::error::{usage, DeskError};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use inkslot_client::{
    parse_timezone, AppointmentActions, AppointmentReceipt, AvailabilityFetcher, ClientError,
    RestBackend, SlotPicker, SlotRow,
};
use inkslot_config::AppConfig;
use inkslot_slots::{AppointmentId, SlotAvailability, SlotMark, StaffId, UserId};
use std::sync::Arc;
use tracing::{debug, info};

pub const USAGE: &str = "\
usage:
  inkslot-desk day <staff> <YYYY-MM-DD> [HH:MM ...]
  inkslot-desk confirm <appointment>
  inkslot-desk cancel <appointment> [reason...]
  inkslot-desk reschedule <user> <appointment> [new-staff|-] [reason...]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print a staff member's day, optionally after toggling local times.
    Day {
        staff: StaffId,
        date: NaiveDate,
        toggles: Vec<NaiveTime>,
    },
    Confirm {
        appointment: AppointmentId,
    },
    Cancel {
        appointment: AppointmentId,
        reason: Option<String>,
    },
    Reschedule {
        user: UserId,
        appointment: AppointmentId,
        /// `-` on the command line keeps the current staff member.
        new_staff: Option<StaffId>,
        reason: Option<String>,
    },
}

fn required(args: &mut impl Iterator<Item = String>, what: &str) -> Result<String, DeskError> {
    args.next().ok_or_else(|| usage(format!("missing {}", what)))
}

/// Whatever words remain, joined with spaces.
fn trailing_reason(args: &mut impl Iterator<Item = String>) -> Option<String> {
    Some(args.collect::<Vec<_>>().join(" ")).filter(|text| !text.is_empty())
}

fn parse_date(text: &str) -> Result<NaiveDate, DeskError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| usage(format!("invalid date '{}'", text)))
}

fn parse_time(text: &str) -> Result<NaiveTime, DeskError> {
    NaiveTime::parse_from_str(text, "%H:%M").map_err(|_| usage(format!("invalid time '{}'", text)))
}

impl Command {
    /// Parses the arguments that follow the program name.
    pub fn parse<I>(args: I) -> Result<Self, DeskError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let name = required(&mut args, "command")?;
        let command = match name.as_str() {
            "day" => Command::Day {
                staff: StaffId::new(required(&mut args, "staff")?),
                date: parse_date(&required(&mut args, "date")?)?,
                toggles: args.by_ref().map(|text| parse_time(&text)).collect::<Result<_, _>>()?,
            },
            "confirm" => Command::Confirm {
                appointment: AppointmentId::new(required(&mut args, "appointment")?),
            },
            "cancel" => Command::Cancel {
                appointment: AppointmentId::new(required(&mut args, "appointment")?),
                reason: trailing_reason(&mut args),
            },
            "reschedule" => Command::Reschedule {
                user: UserId::new(required(&mut args, "user")?),
                appointment: AppointmentId::new(required(&mut args, "appointment")?),
                new_staff: args.next().filter(|staff| staff != "-").map(StaffId::new),
                reason: trailing_reason(&mut args),
            },
            other => return Err(usage(format!("unknown command '{}'", other))),
        };
        if let Some(extra) = args.next() {
            return Err(usage(format!("unexpected argument '{}'", extra)));
        }
        Ok(command)
    }
}

/// Slot start for a wall-clock time of `date` in the studio time zone.
pub fn local_slot(date: NaiveDate, time: NaiveTime, timezone: Tz) -> Result<DateTime<Utc>, ClientError> {
    timezone
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| ClientError::InvalidDate(format!("{} {} does not exist in {}", date, time, timezone)))
}

/// One printable line per grid row, times shown in the studio time zone.
pub fn format_rows(rows: &[SlotRow], timezone: Tz) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let state = match row.availability {
                SlotAvailability::Free => "free",
                SlotAvailability::Blocked => "blocked",
                SlotAvailability::Occupied => "occupied",
            };
            let marker = if row.selected { "[x]" } else { "[ ]" };
            let mark = match row.mark {
                Some(SlotMark::Retained) => " kept",
                Some(SlotMark::ToBeRemoved) => " removed",
                Some(SlotMark::NewlyAdded) => " added",
                None => "",
            };
            format!(
                "{} {} {:<8}{}",
                row.slot.start.with_timezone(&timezone).format("%H:%M"),
                marker,
                state,
                mark
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

fn print_receipt(receipt: &AppointmentReceipt, fallback: &str) {
    println!("{}", receipt.message.as_deref().unwrap_or(fallback));
    if let Some(appointment) = &receipt.appointment {
        println!("{} is now {}", appointment.id, appointment.status);
    }
}

pub async fn run(command: Command, config: &AppConfig) -> Result<(), DeskError> {
    let timezone = parse_timezone(&config.studio.timezone)?;
    let backend = Arc::new(RestBackend::from_config(&config.backend)?);
    debug!("using backend at {}", backend.base_url());

    match command {
        Command::Day { staff, date, toggles } => {
            let fetcher = AvailabilityFetcher::new(backend, timezone);
            let mut picker = SlotPicker::open_new(staff, date);
            picker.refresh(&fetcher).await;
            if let Some(message) = picker.load_error() {
                return Err(DeskError::Unavailable(message.to_string()));
            }

            for time in toggles {
                let slot = local_slot(date, time, timezone)?;
                if let Err(rejection) = picker.toggle(slot) {
                    println!("{}: {}", time.format("%H:%M"), rejection);
                }
            }

            for line in format_rows(&picker.rows(), timezone) {
                println!("{}", line);
            }
            match picker.span() {
                Ok(span) => println!(
                    "span: {} - {}",
                    span.start.with_timezone(&timezone).format("%H:%M"),
                    span.end.with_timezone(&timezone).format("%H:%M")
                ),
                Err(ClientError::EmptySelection) => println!("no slots selected"),
                Err(err) => return Err(err.into()),
            }
        }
        Command::Confirm { appointment } => {
            let receipt = AppointmentActions::new(backend).confirm(&appointment, None).await?;
            print_receipt(&receipt, "appointment confirmed");
        }
        Command::Cancel { appointment, reason } => {
            let receipt = AppointmentActions::new(backend)
                .cancel(&appointment, None, reason)
                .await?;
            print_receipt(&receipt, "appointment cancelled");
        }
        Command::Reschedule {
            user,
            appointment,
            new_staff,
            reason,
        } => {
            let receipt = AppointmentActions::new(backend)
                .propose_reschedule(&user, &appointment, None, new_staff, reason)
                .await?;
            print_receipt(&receipt, "reschedule proposed");
        }
    }
    info!("command finished");
    Ok(())
}
