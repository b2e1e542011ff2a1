
/*!

Implementation of the up/down routings of the fat-tree.

* UpDown
* AdaptiveUpDown

A packet first climbs towards a common ancestor of its source and destination and then descends. The descent is unique; the climb spreads packets over the up-ports, either obliviously by hashing the packet identifier or adaptively by downstream buffer occupancy. Since every path climbs before it descends the channel dependencies are acyclic and the routing is deadlock-free.

*/

use ::rand::rngs::StdRng;

use crate::error::{Error,SourceLocation};
use crate::router::OccupancyMap;
use crate::routing::Routing;
use crate::topology::{RouterClass,Topology};
use crate::{error,source_location,Flit};

///Where the fat-tree descent must turn at each level, derived from the destination node index alone.
#[derive(Debug)]
struct DescentPlan
{
	///Pod of the destination node.
	pod: usize,
	///Edge switch of the destination, within its pod.
	edge: usize,
	///Down-port of the destination's edge switch.
	node_port: usize,
}

fn descent_plan(destination:usize, arity:usize) -> DescentPlan
{
	let m=arity/2;
	DescentPlan{
		pod: destination/(m*m),
		edge: (destination/m)%m,
		node_port: destination%m,
	}
}

/**
Deterministic up/down: the descent is the unique down path, the climb selects the up-port by hashing the packet identifier.

All flits of one packet hash alike, so a packet never splits over two climbs.
**/
#[derive(Debug)]
pub struct UpDown
{
	///The arity of the fat-tree being routed.
	arity: usize,
}

impl Routing for UpDown
{
	fn next(&self, flit:&Flit, topology:&dyn Topology, current_router:usize, _occupancy:&OccupancyMap, _rng:&mut StdRng) -> Result<usize,Error>
	{
		let destination=flit.packet.destination;
		let plan=descent_plan(destination,self.arity);
		let m=self.arity/2;
		let up_port=m + (flit.packet.id as usize)%m;
		match topology.router_class(current_router)
		{
			RouterClass::Edge{pod,switch} =>
			{
				if pod==plan.pod && switch==plan.edge
				{
					Ok(plan.node_port)
				}
				else
				{
					Ok(up_port)
				}
			},
			RouterClass::Aggregation{pod,switch:_} =>
			{
				if pod==plan.pod
				{
					Ok(plan.edge)
				}
				else
				{
					Ok(up_port)
				}
			},
			RouterClass::Core{index:_} => Ok(plan.pod),
			RouterClass::Grid{..} => Err(error!(route_not_found,current_router,destination).with_message("UpDown routing used on a grid router".to_string())),
		}
	}
}

impl UpDown
{
	pub fn new(topology:&dyn Topology) -> UpDown
	{
		let arity=topology.fat_tree_arity().expect("UpDown routing requires a fat-tree topology");
		UpDown{
			arity,
		}
	}
}

/**
As [UpDown], but the climb selects the up-port whose downstream buffer is emptiest. Exact fullness ties resolve to the smaller port number. The descent remains the unique down path.
**/
#[derive(Debug)]
pub struct AdaptiveUpDown
{
	///The arity of the fat-tree being routed.
	arity: usize,
}

impl Routing for AdaptiveUpDown
{
	fn next(&self, flit:&Flit, topology:&dyn Topology, current_router:usize, occupancy:&OccupancyMap, _rng:&mut StdRng) -> Result<usize,Error>
	{
		let destination=flit.packet.destination;
		let plan=descent_plan(destination,self.arity);
		let m=self.arity/2;
		let least_full_up_port=||{
			let mut best=(m,occupancy.fullness(current_router,m));
			for port in m+1..2*m
			{
				let fullness=occupancy.fullness(current_router,port);
				if fullness<best.1
				{
					best=(port,fullness);
				}
			}
			best.0
		};
		match topology.router_class(current_router)
		{
			RouterClass::Edge{pod,switch} =>
			{
				if pod==plan.pod && switch==plan.edge
				{
					Ok(plan.node_port)
				}
				else
				{
					Ok(least_full_up_port())
				}
			},
			RouterClass::Aggregation{pod,switch:_} =>
			{
				if pod==plan.pod
				{
					Ok(plan.edge)
				}
				else
				{
					Ok(least_full_up_port())
				}
			},
			RouterClass::Core{index:_} => Ok(plan.pod),
			RouterClass::Grid{..} => Err(error!(route_not_found,current_router,destination).with_message("AdaptiveUpDown routing used on a grid router".to_string())),
		}
	}
}

impl AdaptiveUpDown
{
	pub fn new(topology:&dyn Topology) -> AdaptiveUpDown
	{
		let arity=topology.fat_tree_arity().expect("AdaptiveUpDown routing requires a fat-tree topology");
		AdaptiveUpDown{
			arity,
		}
	}
}
