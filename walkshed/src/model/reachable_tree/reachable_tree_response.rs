use geojson::{Feature, FeatureCollection, GeoJson};
use serde_json::Value;

use super::ReachableTreeError;

/// the layers of a reachable tree response, each normalized to a FeatureCollection.
#[derive(Clone, Debug)]
pub struct ReachableTree {
    /// street network edges reachable within the cost budget
    pub edges: FeatureCollection,
    /// network nodes annotated with their travel cost
    pub node_costs: FeatureCollection,
    pub origin: FeatureCollection,
}

/// one layer of a reachable tree and the file name token that identifies it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReachableTreeLayer {
    Edges,
    NodeCosts,
    Origin,
}

impl ReachableTreeLayer {
    pub const ALL: [ReachableTreeLayer; 3] = [
        ReachableTreeLayer::Edges,
        ReachableTreeLayer::NodeCosts,
        ReachableTreeLayer::Origin,
    ];

    /// the response member holding this layer
    pub fn key(&self) -> &'static str {
        match self {
            ReachableTreeLayer::Edges => "edges",
            ReachableTreeLayer::NodeCosts => "node_costs",
            ReachableTreeLayer::Origin => "origin",
        }
    }

    /// middle token of the output file name, as in `Kirkland RT Walking`
    pub fn token(&self) -> &'static str {
        match self {
            ReachableTreeLayer::Edges => "RT",
            ReachableTreeLayer::NodeCosts => "Cost",
            ReachableTreeLayer::Origin => "Origin",
        }
    }

    pub fn file_name(&self, location: &str, profile: &str) -> String {
        format!("{location} {} {profile}.geojson", self.token())
    }
}

impl ReachableTree {
    pub fn layer(&self, layer: ReachableTreeLayer) -> &FeatureCollection {
        match layer {
            ReachableTreeLayer::Edges => &self.edges,
            ReachableTreeLayer::NodeCosts => &self.node_costs,
            ReachableTreeLayer::Origin => &self.origin,
        }
    }

    /// decodes a response body. a body without `edges` means the service found
    /// nothing to return for the query.
    pub fn try_from_response(mut body: Value) -> Result<ReachableTree, ReachableTreeError> {
        if body.get(ReachableTreeLayer::Edges.key()).is_none() {
            return Err(ReachableTreeError::NoResults(truncate(&body.to_string())));
        }
        let mut take = |layer: ReachableTreeLayer| -> Result<FeatureCollection, ReachableTreeError> {
            let value = body
                .get_mut(layer.key())
                .map(Value::take)
                .ok_or_else(|| {
                    ReachableTreeError::InvalidResponse(format!("missing '{}' member", layer.key()))
                })?;
            let geojson = GeoJson::from_json_value(value).map_err(|e| {
                ReachableTreeError::InvalidResponse(format!("'{}' is not GeoJSON: {e}", layer.key()))
            })?;
            Ok(into_feature_collection(geojson))
        };
        Ok(ReachableTree {
            edges: take(ReachableTreeLayer::Edges)?,
            node_costs: take(ReachableTreeLayer::NodeCosts)?,
            origin: take(ReachableTreeLayer::Origin)?,
        })
    }
}

fn into_feature_collection(geojson: GeoJson) -> FeatureCollection {
    let features = match geojson {
        GeoJson::FeatureCollection(fc) => return fc,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![Feature::from(geometry)],
    };
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn truncate(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    if body.chars().count() > MAX_CHARS {
        format!("{}...", body.chars().take(MAX_CHARS).collect::<String>())
    } else {
        body.to_string()
    }
}
