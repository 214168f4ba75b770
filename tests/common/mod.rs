use aie_pathfinder::port::{Bundle, PathNode, Port, TileID};

pub fn node(col: u32, row: u32, bundle: Bundle, channel: u32) -> PathNode {
	PathNode::new(TileID::new(col, row), Port::new(bundle, channel))
}

pub fn port(bundle: Bundle, channel: u32) -> Port {
	Port::new(bundle, channel)
}

pub fn tile(col: u32, row: u32) -> TileID {
	TileID::new(col, row)
}
