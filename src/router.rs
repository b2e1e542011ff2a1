
/*!

The input-queued virtual-channel router.

Every cycle the router inspects the head flit of each `(input port, virtual channel)` FIFO, asks the routing for its output port, and arbitrates each contested output port with a round-robin token. It returns at most one flit per output port and only removes the winners from its own buffers; moving them to neighbour routers or ejecting them to nodes is the business of the cycle engine.

*/

use std::collections::{BTreeMap,VecDeque};

use ::rand::rngs::StdRng;
use log::warn;

use crate::routing::Routing;
use crate::topology::Topology;
use crate::Flit;

/**
Occupancy of the reception buffers at the far end of every outbound link, taken once per cycle before any router computes routes. All routers of a fabric observe this same pre-cycle snapshot, so adaptive decisions cannot race with the flit movements of the current cycle.
**/
#[derive(Debug)]
pub struct OccupancyMap
{
	///`ports[router][port][vc]` counts the flits buffered at the downstream input buffer. `None` for ports without an outbound router link.
	ports: Vec<Vec<Option<Vec<usize>>>>,
	///Nominal capacity of each virtual-channel buffer.
	buffer_size: usize,
}

impl OccupancyMap
{
	pub fn new(ports:Vec<Vec<Option<Vec<usize>>>>, buffer_size:usize) -> OccupancyMap
	{
		OccupancyMap{
			ports,
			buffer_size,
		}
	}
	///Fraction of the downstream input buffer already in use when leaving `router_index` through `port`.
	///Ports without an outbound link report 1.0.
	pub fn fullness(&self, router_index:usize, port:usize) -> f64
	{
		match self.ports[router_index][port]
		{
			Some(ref occupancy) => occupancy.iter().sum::<usize>() as f64 / (occupancy.len()*self.buffer_size) as f64,
			None => 1.0,
		}
	}
	///Flits buffered at the downstream virtual channel, if the port has an outbound link.
	pub fn virtual_channel_len(&self, router_index:usize, port:usize, virtual_channel:usize) -> Option<usize>
	{
		self.ports[router_index][port].as_ref().map(|occupancy|occupancy[virtual_channel])
	}
}

///The argument of the router builder.
#[derive(Debug)]
pub struct RouterBuilderArgument
{
	///Its index in the topology.
	pub router_index: usize,
	///Fixed port count, as given by the topology.
	pub num_ports: usize,
	pub num_virtual_channels: usize,
	///Depth of each virtual-channel FIFO.
	pub buffer_size: usize,
	///Whether arbitration skips winners whose downstream virtual-channel buffer is already full.
	pub strict_backpressure: bool,
}

///An input-queued router with a FIFO per `(port, virtual channel)` and a round-robin arbiter per output port.
#[derive(Debug)]
pub struct Router
{
	///Its index in the topology.
	router_index: usize,
	num_virtual_channels: usize,
	///Depth of each input buffer. The baseline engine does not enforce it on insertion; `strict_backpressure` enforces it at arbitration.
	buffer_size: usize,
	strict_backpressure: bool,
	///`input_buffers[port][vc]`, strictly FIFO.
	input_buffers: Vec<Vec<VecDeque<Flit>>>,
	///Round-robin token of each output port arbiter, indexing the last served contender.
	port_token: Vec<usize>,
}

impl Router
{
	pub fn new(arg:RouterBuilderArgument) -> Router
	{
		Router{
			router_index: arg.router_index,
			num_virtual_channels: arg.num_virtual_channels,
			buffer_size: arg.buffer_size,
			strict_backpressure: arg.strict_backpressure,
			input_buffers: (0..arg.num_ports).map(|_|(0..arg.num_virtual_channels).map(|_|VecDeque::new()).collect()).collect(),
			port_token: vec![0;arg.num_ports],
		}
	}
	pub fn num_ports(&self) -> usize
	{
		self.input_buffers.len()
	}
	pub fn num_virtual_channels(&self) -> usize
	{
		self.num_virtual_channels
	}
	pub fn buffer_size(&self) -> usize
	{
		self.buffer_size
	}
	///Append a flit at the tail of the input buffer selected by the flit's virtual channel.
	pub fn insert(&mut self, port:usize, flit:Flit)
	{
		let virtual_channel=flit.virtual_channel;
		self.input_buffers[port][virtual_channel].push_back(flit);
	}
	///Flits currently buffered at each virtual channel of the given port.
	pub fn virtual_channel_occupancy(&self, port:usize) -> Vec<usize>
	{
		self.input_buffers[port].iter().map(|buffer|buffer.len()).collect()
	}
	///Total number of flits buffered in this router.
	pub fn buffered_flits(&self) -> usize
	{
		self.input_buffers.iter().map(|port|port.iter().map(|buffer|buffer.len()).sum::<usize>()).sum()
	}
	/**
	Perform the routing and arbitration of one cycle.

	For every non-empty FIFO the head flit requests the output port given by the routing. Requests are grouped by output port and each group is arbitrated round-robin: the arbiter tries contenders starting right after the token and grants the first admissible one, then leaves the token on the winner. Exactly one winner per output port; the winner is popped from its FIFO and returned.

	A flit whose routing cannot resolve an output port should not exist by construction; if it appears it is logged and dropped.
	**/
	pub fn process_cycle(&mut self, routing:&dyn Routing, topology:&dyn Topology, occupancy:&OccupancyMap, rng:&mut StdRng) -> Vec<(usize,Flit)>
	{
		//Collect `requests[out_port] = [(in_port,vc), ...]` from the heads of the input buffers.
		let mut requests : BTreeMap<usize,Vec<(usize,usize)>> = BTreeMap::new();
		let mut dropped : Vec<(usize,usize)> = Vec::new();
		for in_port in 0..self.input_buffers.len()
		{
			for virtual_channel in 0..self.num_virtual_channels
			{
				if let Some(head_flit)=self.input_buffers[in_port][virtual_channel].front()
				{
					match routing.next(head_flit,topology,self.router_index,occupancy,rng)
					{
						Ok(out_port) => requests.entry(out_port).or_insert_with(Vec::new).push((in_port,virtual_channel)),
						Err(routing_error) =>
						{
							warn!("router {} drops a flit without route: {}",self.router_index,routing_error);
							dropped.push((in_port,virtual_channel));
						},
					}
				}
			}
		}
		for (in_port,virtual_channel) in dropped
		{
			self.input_buffers[in_port][virtual_channel].pop_front();
		}
		//Round-robin arbitration of each contested output port.
		let mut forwarded : Vec<(usize,Flit)> = Vec::with_capacity(requests.len());
		for (out_port,contenders) in requests
		{
			let start_index=self.port_token[out_port];
			for attempt in 0..contenders.len()
			{
				let winner_index=(start_index+attempt)%contenders.len();
				let (in_port,virtual_channel)=contenders[winner_index];
				if self.strict_backpressure
				{
					if let Some(used)=occupancy.virtual_channel_len(self.router_index,out_port,virtual_channel)
					{
						if used>=self.buffer_size
						{
							continue;
						}
					}
				}
				self.port_token[out_port]=(winner_index+1)%contenders.len();
				let flit=self.input_buffers[in_port][virtual_channel].pop_front().expect("the arbitrated buffer has a head flit");
				forwarded.push((out_port,flit));
				break;
			}
		}
		forwarded
	}
}
