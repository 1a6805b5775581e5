//! Global engine state and initialization.

use crate::channel::ChannelPool;
use crate::collab::{AtablController, DmaChanParams, DmaController, DmaDevice, UniproLink, WorkerSpawn};
use crate::cport::CportState;
use crate::error::TxError;
use crate::rev::Rev;
use crate::sync::irq::{InterruptController, MutexIrq};
use crate::sync::mutex::Mutex;
use crate::sync::semaphore::Semaphore;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

pub(crate) fn handshake_threshold() -> u8 {
    unipro_tx_shared::regs::handshake_threshold(cfg!(feature = "wmb"))
}

/// Global TX DMA engine state: channel pool, device handles, and the
/// per-CPort queues.
///
/// `N` is the fixed capacity of the channel pool; `max_channel <= N` is
/// the effective pool size negotiated at `tx_init` against the DMA and
/// ATABL device's free counts.
pub struct Engine<const N: usize> {
    pub(crate) rev: Rev,
    pub(crate) dma: Box<dyn DmaController>,
    pub(crate) link: Box<dyn UniproLink>,
    pub(crate) intr: Arc<dyn InterruptController>,
    pub(crate) cports: MutexIrq<Vec<CportState>>,
    pub(crate) channels: Mutex<ChannelPool<N>>,
    pub(crate) tx_fifo_lock: Semaphore,
}

/// Collaborators + configuration consumed by [`Engine::tx_init`].
pub struct TxInitConfig {
    pub rev: Rev,
    pub dma: Box<dyn DmaController>,
    pub link: Box<dyn UniproLink>,
    pub spawner: Box<dyn WorkerSpawn>,
    pub intr: Arc<dyn InterruptController>,
    /// Requested DMA channel count (`UNIPROTX_DMA_NUM_CHANNELS`).
    pub requested_channels: usize,
}

impl<const N: usize> Engine<N> {
    pub(crate) fn cport_count(&self) -> usize {
        self.cports.lock().len()
    }

    pub(crate) fn channel_index_for(&self, cportid: crate::ids::CportId) -> usize {
        self.channels.lock().index_for(cportid)
    }

    /// Sets up the engine and starts the worker task.
    ///
    /// Returns the negative-errno code on failure (`tx_init() -> 0 |
    /// -ENODEV`); the success case additionally hands back the
    /// constructed engine rather than populating a module-level
    /// singleton, since this crate is a library with no implicit global
    /// instance (see `DESIGN.md`).
    pub fn tx_init(config: TxInitConfig) -> Result<Arc<Self>, i32> {
        let TxInitConfig {
            rev,
            dma,
            link,
            spawner,
            intr,
            requested_channels,
        } = config;

        if dma.open().is_err() {
            return Err(TxError::NoDevice.into());
        }

        let cport_count = link.cport_count();

        if let Some(atabl) = rev.atabl() {
            let threshold = handshake_threshold();
            for i in 0..cport_count {
                let cportid = crate::ids::CportId(i as u32);
                let raw = link.read_handshake_reg(cportid);
                let reg = unipro_tx_shared::regs::TxBufferSpaceReg::new_with_raw_value(raw)
                    .with_handshake_threshold(threshold);
                link.write_handshake_reg(cportid, reg.raw_value());
            }

            if atabl.open().is_err() {
                dma.close();
                return Err(TxError::NoDevice.into());
            }
        }

        let mut avail_chan = dma.chan_free_count().min(N).min(requested_channels);

        if let Some(atabl) = rev.atabl() {
            if atabl.req_free_count() < avail_chan {
                atabl.close();
                dma.close();
                return Err(TxError::NoDevice.into());
            }
        }

        let mut pool = ChannelPool::<N>::new();
        let dst_device = if rev.atabl().is_some() {
            DmaDevice::Unipro
        } else {
            DmaDevice::Mem
        };

        let mut i = 0;
        while i < avail_chan {
            let mut dst_peripheral_id = 0;

            if let Some(atabl) = rev.atabl() {
                let req = match atabl.req_alloc() {
                    Ok(req) => req,
                    Err(_) => break,
                };
                dst_peripheral_id = atabl.req_to_peripheral_id(req);
                pool.channels[i].atabl_req = Some(req);
            }

            let params = DmaChanParams {
                src_device: DmaDevice::Mem,
                dst_device,
                dst_peripheral_id,
                transfer_size_bits: 64,
                burst_len: 16,
            };

            let chan = match dma.chan_alloc(params) {
                Ok(chan) => chan,
                Err(_) => {
                    unipro_tx_shared::eprintln!("couldn't allocate all {} requested channel(s)", avail_chan);
                    if let Some(atabl) = rev.atabl() {
                        if let Some(req) = pool.channels[i].atabl_req.take() {
                            atabl.req_free(req);
                        }
                    }
                    break;
                }
            };

            pool.channels[i].dma_handle = Some(chan);
            pool.channels[i].bound_cportid = None;
            pool.max_channel += 1;
            i += 1;
        }
        avail_chan = pool.max_channel;

        if avail_chan == 0 {
            unipro_tx_shared::eprintln!("couldn't allocate a single DMA channel");
            teardown_partial(&dma, rev.atabl(), &pool);
            if let Some(atabl) = rev.atabl() {
                atabl.close();
            }
            dma.close();
            return Err(TxError::NoDevice.into());
        }

        unipro_tx_shared::println!("{} DMA channel(s) allocated", avail_chan);

        let mut cports = Vec::with_capacity(cport_count);
        for i in 0..cport_count {
            let cportid = crate::ids::CportId(i as u32);
            cports.push(CportState::new(link.cport_tx_buf(cportid)));
        }

        let engine = Arc::new(Engine {
            rev,
            dma,
            link,
            intr: intr.clone(),
            cports: MutexIrq::new(cports, intr),
            channels: Mutex::new(pool),
            tx_fifo_lock: Semaphore::new(0),
        });

        let worker_engine = engine.clone();
        if let Err(e) = spawner.spawn(Box::new(move || worker_engine.worker_loop())) {
            unipro_tx_shared::eprintln!("failed to create worker task");
            let pool = engine.channels.lock();
            teardown_partial(&engine.dma, engine.rev.atabl(), &pool);
            if let Some(atabl) = engine.rev.atabl() {
                atabl.close();
            }
            engine.dma.close();
            return Err(e.into());
        }

        Ok(engine)
    }

    /// Tears down the engine: frees every channel/ATABL request and
    /// closes the devices acquired by `tx_init`, in reverse order.
    ///
    /// Standard library hygiene rather than an original-source
    /// behavior — NuttX never tears UniPro down once booted — so tests
    /// can construct and destroy engines repeatedly without
    /// process-level isolation.
    pub fn tx_shutdown(&self) {
        let pool = self.channels.lock();
        teardown_partial(&self.dma, self.rev.atabl(), &pool);
        if let Some(atabl) = self.rev.atabl() {
            atabl.close();
        }
        self.dma.close();
    }
}

fn teardown_partial<const N: usize>(
    dma: &Box<dyn DmaController>,
    atabl: Option<&dyn AtablController>,
    pool: &ChannelPool<N>,
) {
    for i in 0..pool.max_channel {
        if let Some(atabl_dev) = atabl {
            if let Some(req) = pool.channels[i].atabl_req {
                atabl_dev.req_free(req);
            }
        }
        if let Some(chan) = pool.channels[i].dma_handle {
            dma.chan_free(chan);
        }
    }
}
