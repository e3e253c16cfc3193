use emberwood_core::types::{CookState, EntityHandle, FoodKind};
use emberwood_core::EmberError;
use emberwood_sim::Campsite;
use glam::Vec3;

/// Where the scripted player stands next to an object it wants to use.
const STAND_OFF: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Fixed objects a scenario placed during setup.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub campfire: Option<(EntityHandle, Vec3)>,
    pub station: Option<(EntityHandle, Vec3)>,
    pub pantries: Vec<(FoodKind, Vec3)>,
}

impl Layout {
    pub fn pantry(&self, kind: FoodKind) -> Option<Vec3> {
        self.pantries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, at)| *at)
    }
}

/// What the scripted player does this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub at: Vec3,
    /// Tap the interact button if the runner's cadence allows it.
    pub interact: bool,
}

impl Step {
    fn go(at: Vec3) -> Self {
        Self { at, interact: true }
    }

    fn wait(at: Vec3) -> Self {
        Self {
            at,
            interact: false,
        }
    }
}

/// A scripted play session: a campsite layout plus a player policy.
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    setup: fn(&mut Campsite) -> Result<Layout, EmberError>,
    drive: fn(&Campsite, &Layout) -> Step,
}

impl Scenario {
    pub fn setup(&self, site: &mut Campsite) -> Result<Layout, EmberError> {
        (self.setup)(site)
    }

    pub fn drive(&self, site: &Campsite, layout: &Layout) -> Step {
        (self.drive)(site, layout)
    }
}

/// The standard scenario suite.
pub fn standard_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "fire-keeper",
            description: "Chop one tree and keep a campfire fed",
            setup: setup_fire_keeper,
            drive: drive_fire_keeper,
        },
        Scenario {
            name: "cook-and-serve",
            description: "Cook whatever visitors ask for and hand it over",
            setup: setup_cook_and_serve,
            drive: drive_cook_and_serve,
        },
        Scenario {
            name: "lumberjack",
            description: "Chop a row of trees and hoard the logs",
            setup: setup_lumberjack,
            drive: drive_lumberjack,
        },
    ]
}

fn nearest(from: Vec3, points: impl Iterator<Item = Vec3>) -> Option<Vec3> {
    points.min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

/// Next spot for gathering wood: a log on the ground, the tree being
/// chopped, or the closest standing tree.
fn gather_wood(site: &Campsite) -> Option<Step> {
    let here = site.player().position;
    let entities = site.entities();
    if let Some(log) = nearest(here, entities.logs.iter().map(|l| l.position)) {
        return Some(Step::go(log));
    }
    if let Some((handle, _)) = site.pending_action() {
        if let Some(tree) = entities.tree(handle) {
            return Some(Step::wait(tree.position + STAND_OFF));
        }
    }
    nearest(
        here,
        entities
            .trees
            .iter()
            .filter(|t| !t.gate.is_cut())
            .map(|t| t.position),
    )
    .map(|at| Step::go(at + STAND_OFF))
}

fn setup_fire_keeper(site: &mut Campsite) -> Result<Layout, EmberError> {
    let fire_at = Vec3::ZERO;
    let fire = site.add_campfire(fire_at);
    site.add_tree(Vec3::new(8.0, 0.0, 0.0));
    Ok(Layout {
        campfire: Some((fire, fire_at)),
        ..Layout::default()
    })
}

fn drive_fire_keeper(site: &Campsite, layout: &Layout) -> Step {
    let here = site.player().position;
    let Some((fire, fire_at)) = layout.campfire else {
        return Step::wait(here);
    };
    let spot = fire_at + STAND_OFF;
    let per_log = site.config().fuel.fuel_per_log;
    let has_room = site
        .entities()
        .campfire(fire)
        .is_some_and(|c| c.fuel.max() - c.fuel.level() >= per_log);

    if site.wood() > 0 && has_room {
        return Step::go(spot);
    }
    if site.wood() < 3 || !site.entities().logs.is_empty() {
        if let Some(step) = gather_wood(site) {
            return step;
        }
    }
    Step::wait(spot)
}

fn setup_cook_and_serve(site: &mut Campsite) -> Result<Layout, EmberError> {
    let fire_at = Vec3::ZERO;
    let fire = site.add_campfire(fire_at);
    let station_at = Vec3::new(0.0, 0.0, 2.0);
    let station = site.add_station(station_at, fire)?;

    let mut pantries = Vec::new();
    for (i, kind) in FoodKind::ALL.into_iter().enumerate() {
        let at = Vec3::new(-6.0 + 6.0 * i as f32, 0.0, -6.0);
        site.add_pantry(at, kind)?;
        pantries.push((kind, at));
    }
    for x in [-6.0, 0.0, 6.0] {
        site.add_visitor_spawn_point(Vec3::new(x, 0.0, 8.0));
    }

    Ok(Layout {
        campfire: Some((fire, fire_at)),
        station: Some((station, station_at)),
        pantries,
    })
}

fn drive_cook_and_serve(site: &Campsite, layout: &Layout) -> Step {
    let here = site.player().position;
    let Some((station, station_at)) = layout.station else {
        return Step::wait(here);
    };
    let slot = site
        .entities()
        .station(station)
        .and_then(|s| s.process.food().zip(s.process.state()));
    let mut open = site
        .entities()
        .visitors
        .iter()
        .filter_map(|v| v.cycle.request().food().map(|kind| (kind, v.position)));

    match site.held() {
        None => match slot {
            Some((_, CookState::Raw)) => Step::wait(station_at),
            Some(_) => Step::go(station_at),
            None => open
                .next()
                .and_then(|(kind, _)| layout.pantry(kind))
                .map_or(Step::wait(station_at), Step::go),
        },
        Some(held) if held.state == CookState::Raw => Step::go(station_at),
        Some(held) => {
            let visitors: Vec<(FoodKind, Vec3)> = open.collect();
            visitors
                .iter()
                .find(|(kind, _)| *kind == held.kind)
                .or(visitors.first())
                .map_or(Step::wait(station_at), |(_, at)| Step::go(*at))
        }
    }
}

fn setup_lumberjack(site: &mut Campsite) -> Result<Layout, EmberError> {
    for x in [-8.0, 0.0, 8.0] {
        site.add_tree(Vec3::new(x, 0.0, 4.0));
    }
    Ok(Layout::default())
}

fn drive_lumberjack(site: &Campsite, _layout: &Layout) -> Step {
    gather_wood(site).unwrap_or(Step::wait(site.player().position))
}
