//! CLI command implementations

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geo::Point;
use streetchain_core::prelude::*;

use crate::RouteArgs;
use crate::config::AppConfig;

fn load_route(args: &RouteArgs) -> Result<(RoadGraph, Vec<RoadNodeId>)> {
    let graph = load_road_graph(&args.graph).context("Failed to load road graph")?;
    let path = load_path(&args.path).context("Failed to load path")?;
    Ok((graph, path))
}

fn address_book(args: &RouteArgs, config: &AppConfig) -> Result<Option<AddressBook>> {
    let Some(path) = args
        .address_book
        .as_deref()
        .or(config.geocoding.address_book.as_deref())
    else {
        return Ok(None);
    };
    let book = AddressBook::load(path, config.geocoding.max_distance)
        .context("Failed to load address book")?;
    Ok(Some(book))
}

/// Explicit address if given, otherwise the geocoded address of `point`
fn endpoint_address(
    explicit: Option<&str>,
    point: Option<Point<f64>>,
    geocoder: Option<&AddressBook>,
) -> Option<String> {
    if let Some(address) = explicit {
        return Some(address.to_string());
    }
    match (point, geocoder) {
        (Some(point), Some(geocoder)) => resolve_address(geocoder, point),
        (Some(_), None) => {
            tracing::warn!("No address book configured, endpoint address unknown");
            None
        }
        (None, _) => None,
    }
}

fn endpoint_addresses(
    args: &RouteArgs,
    config: &AppConfig,
) -> Result<(Option<String>, Option<String>)> {
    let book = address_book(args, config)?;
    Ok((
        endpoint_address(args.start_address.as_deref(), args.start, book.as_ref()),
        endpoint_address(args.end_address.as_deref(), args.end, book.as_ref()),
    ))
}

pub fn summary(args: &RouteArgs, config: &AppConfig, json: bool, save: Option<&Path>) -> Result<()> {
    let (graph, path) = load_route(args)?;
    let plan = plan_route(&path, &graph, &config.encoder).context("Failed to plan route")?;
    let (start_address, end_address) = endpoint_addresses(args, config)?;

    let summary = RouteSummary::new(
        &plan,
        args.start.map(|point| Endpoint::new(point, start_address)),
        args.end.map(|point| Endpoint::new(point, end_address)),
    );
    let document = summary.to_json_pretty()?;

    if json {
        println!("{document}");
    } else {
        println!("{summary}");
    }

    if let Some(file) = save {
        fs::write(file, &document)
            .with_context(|| format!("Failed to save route data to {}", file.display()))?;
        tracing::info!("Route data saved to {}", file.display());
    }
    Ok(())
}

pub fn encode(args: &RouteArgs, config: &AppConfig) -> Result<()> {
    let (graph, path) = load_route(args)?;
    let (start_address, end_address) = endpoint_addresses(args, config)?;

    let store = MemoryStore::new();
    let batch = encode_route(
        &path,
        &graph,
        start_address.as_deref(),
        end_address.as_deref(),
        &store,
        &config.encoder,
    )
    .context("Failed to encode route")?;

    for triple in &batch {
        println!(
            "{} -{}-> {}",
            store.identifier(triple.subject)?.unwrap_or_default(),
            triple.predicate,
            store.identifier(triple.object)?.unwrap_or_default()
        );
    }
    tracing::info!(
        "Encoded {} facts over {} concept nodes",
        batch.len(),
        store.node_count()?
    );
    Ok(())
}
