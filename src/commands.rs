use crate::aircraft::Aircraft;
use crate::airport;
use crate::clock::Clock;
use crate::flight::{FlightRoute, RouteRow, RouteStatus};
use crate::form::{FormError, RouteForm, saved_as_preview};
use crate::store::{RouteStore, StoreError};
use crate::timeline::{GanttChart, NowMarker};
use crate::wall_clock::{WallClock, format_for_display};
use chrono::{Local, TimeDelta};
use log::{info, warn};
use rustyline::error::ReadlineError;
use std::collections::HashSet;
use std::thread;
use std::time::Duration;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Prompt(#[from] ReadlineError),
    #[error("no flight matches '{0}'")]
    UnknownFlight(String),
    #[error("'{query}' matches {count} flights, use the route id instead")]
    AmbiguousFlight { query: String, count: usize },
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
}

pub trait Prompt {
    fn ask(&mut self, prompt: &str, initial: &str) -> rustyline::Result<String>;

    fn say(&mut self, line: &str);

    fn page(&mut self, text: String) {
        self.say(&text);
    }

    fn clear(&mut self) {}
}

pub struct Console<S: RouteStore> {
    pub store: S,
    pub clock: Box<dyn Clock>,
    pub columns: usize,
    pub colorize: bool,
    pub tick_ms: u64,
}

impl<S: RouteStore> Console<S> {
    pub fn list(&self, io: &mut dyn Prompt, filter: Option<&str>) -> Result<(), CommandError> {
        let filter = match filter {
            None | Some("a") | Some("all") => None,
            Some(token) => Some(
                RouteStatus::from_token(token).ok_or_else(|| CommandError::UnknownStatus(token.to_string()))?,
            ),
        };
        let aircraft = self.store.active_aircraft()?;
        let rows = self
            .store
            .routes()?
            .iter()
            .filter(|r| filter.is_none_or(|s| r.status == s))
            .map(|r| {
                let registration = aircraft
                    .iter()
                    .find(|a| a.id == r.aircraft_id)
                    .map(|a| a.registration.as_str());
                RouteRow::new(r, registration, self.colorize)
            })
            .collect::<Vec<_>>();

        if rows.is_empty() {
            io.say("No matching flights found.");
        } else {
            io.page(table(&rows));
        }
        Ok(())
    }

    pub fn aircraft(&self, io: &mut dyn Prompt) -> Result<(), CommandError> {
        let aircraft = self.store.active_aircraft()?;
        if aircraft.is_empty() {
            io.say("No active aircraft.");
        } else {
            io.page(table(&aircraft));
        }
        Ok(())
    }

    pub fn airports(&self, io: &mut dyn Prompt, query: &str) {
        let found = airport::search(query);
        if found.is_empty() {
            io.say("No airport found.");
        } else {
            io.page(table(found));
        }
    }

    pub fn now(&self, io: &mut dyn Prompt) {
        let now = self.clock.now();
        let chart = GanttChart::new(now, self.columns, self.colorize);
        io.say(&format!("UTC:   {}", format_for_display(&now)));
        io.say(&format!("Local: {}", now.as_datetime().with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")));
        match chart.now {
            NowMarker::At(p) => io.say(&format!("Now marker at {p:.1}% of {}", chart.title())),
            NowMarker::OutOfWindow => io.say(&format!("Now is outside {}", chart.title())),
        }
    }

    pub fn gantt(&self, io: &mut dyn Prompt) -> Result<(), CommandError> {
        let aircraft = self.store.active_aircraft()?;
        let routes = self.store.routes()?;
        let known = aircraft.iter().map(|a| a.id.clone()).collect::<HashSet<_>>();
        routes
            .iter()
            .filter(|r| !known.contains(&r.aircraft_id))
            .for_each(|r| warn!("flight {} is on unknown or inactive aircraft {}", r.flight_number, r.aircraft_id));

        let now = self.clock.now();
        let chart = GanttChart::new(now, self.columns, self.colorize);
        let local = now.as_datetime().with_timezone(&Local);
        io.say(&format!("Timeline View  {}", chart.title()));
        io.say(&format!(
            "Local: {}  UTC: {}",
            local.format("%H:%M:%S"),
            now.as_datetime().format("%H:%M:%S")
        ));
        io.say(&chart.render(&aircraft, &routes));
        Ok(())
    }

    pub fn watch(&mut self, io: &mut dyn Prompt, ticks: u32) -> Result<(), CommandError> {
        for tick in 0..ticks {
            if tick > 0 {
                thread::sleep(Duration::from_millis(self.tick_ms));
                self.clock.advance(TimeDelta::milliseconds(self.tick_ms as i64));
            }
            io.clear();
            self.gantt(io)?;
        }
        Ok(())
    }

    pub fn add(&mut self, io: &mut dyn Prompt) -> Result<(), CommandError> {
        let aircraft = self.store.active_aircraft()?;
        let form = fill_form(io, RouteForm::blank(&aircraft), &aircraft)?;
        let draft = submit(io, &form, &aircraft)?;
        let route = self.store.insert_route(draft)?;
        info!("added flight {} ({})", route.flight_number, route.id);
        io.say("Flight added successfully");
        Ok(())
    }

    pub fn edit(&mut self, io: &mut dyn Prompt, query: &str) -> Result<(), CommandError> {
        let route = self.find(query)?;
        let aircraft = self.store.active_aircraft()?;
        let form = fill_form(io, RouteForm::from_route(&route), &aircraft)?;
        let draft = submit(io, &form, &aircraft)?;
        self.store.update_route(&route.id, draft)?;
        info!("updated flight {} ({})", route.flight_number, route.id);
        io.say("Flight updated successfully");
        Ok(())
    }

    pub fn remove(&mut self, io: &mut dyn Prompt, query: &str) -> Result<(), CommandError> {
        let route = self.find(query)?;
        let answer = io.ask(
            &format!(
                "Delete flight {}? This action cannot be undone. [y/N] ",
                route.flight_number
            ),
            "",
        )?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            io.say("Cancelled.");
            return Ok(());
        }
        self.store.delete_route(&route.id)?;
        info!("deleted flight {} ({})", route.flight_number, route.id);
        io.say("Flight deleted successfully");
        Ok(())
    }

    // route id first, then flight number
    fn find(&self, query: &str) -> Result<FlightRoute, CommandError> {
        let routes = self.store.routes()?;
        if let Some(route) = routes.iter().find(|r| *r.id == *query) {
            return Ok(route.clone());
        }
        let mut matches = routes
            .into_iter()
            .filter(|r| r.flight_number.eq_ignore_ascii_case(query))
            .collect::<Vec<_>>();
        match matches.len() {
            0 => Err(CommandError::UnknownFlight(query.to_string())),
            1 => Ok(matches.remove(0)),
            count => Err(CommandError::AmbiguousFlight {
                query: query.to_string(),
                count,
            }),
        }
    }
}

fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}

fn fill_form(io: &mut dyn Prompt, mut form: RouteForm, aircraft: &[Aircraft]) -> Result<RouteForm, CommandError> {
    form.flight_number = io.ask("Flight number: ", &form.flight_number)?;

    let registrations = aircraft.iter().map(|a| a.registration.as_str()).collect::<Vec<_>>();
    let current = aircraft
        .iter()
        .find(|a| *a.id == *form.aircraft_id)
        .map(|a| a.registration.clone())
        .unwrap_or_default();
    let answer = io.ask(&format!("Aircraft [{}]: ", registrations.join(", ")), &current)?;
    form.aircraft_id = aircraft
        .iter()
        .find(|a| a.registration.eq_ignore_ascii_case(answer.trim()))
        .map(|a| a.id.to_string())
        .unwrap_or(answer);

    form.origin = io.ask("Origin (IATA): ", &form.origin)?;
    form.destination = io.ask("Destination (IATA): ", &form.destination)?;

    form.departure_time = ask_time(io, "Departure Time (UTC, YYYY-MM-DDTHH:mm): ", &form.departure_time)?;
    form.arrival_time = ask_time(io, "Arrival Time (UTC, YYYY-MM-DDTHH:mm): ", &form.arrival_time)?;

    let tokens = RouteStatus::ALL.iter().map(|s| s.token()).collect::<Vec<_>>();
    let answer = io.ask(&format!("Status [{}]: ", tokens.join(", ")), form.status.token())?;
    form.status = RouteStatus::from_token(&answer).ok_or(CommandError::UnknownStatus(answer))?;
    Ok(form)
}

fn ask_time(io: &mut dyn Prompt, prompt: &str, initial: &WallClock) -> Result<WallClock, CommandError> {
    let value = WallClock::new(io.ask(prompt, initial.as_str())?.trim());
    if let Some(preview) = saved_as_preview(&value) {
        io.say(&format!("  {preview}"));
    }
    Ok(value)
}

fn submit(
    io: &mut dyn Prompt,
    form: &RouteForm,
    aircraft: &[Aircraft],
) -> Result<crate::flight::RouteDraft, CommandError> {
    form.submit(aircraft).map_err(|err| {
        if let FormError::UnknownAirport { code } = &err {
            let suggestions = airport::search(code)
                .iter()
                .take(5)
                .map(|a| a.to_string())
                .collect::<Vec<_>>();
            if !suggestions.is_empty() {
                io.say(&format!("Did you mean: {}", suggestions.join("; ")));
            }
        }
        CommandError::Form(err)
    })
}
