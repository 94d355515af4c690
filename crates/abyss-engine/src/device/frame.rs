use std::cell::RefCell;
use std::rc::Rc;

/// A single acquired frame with its recorded commands.
///
/// Holding the surface texture prevents acquisition of subsequent frames, so
/// a frame is either presented or discarded before the next clear.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
    pub queue: wgpu::Queue,
}

impl GpuFrame {
    /// Submits the recorded commands and presents the surface texture.
    pub fn present(self) {
        self.queue.submit(std::iter::once(self.encoder.finish()));
        drop(self.view);
        self.surface_texture.present();
    }
}

/// Hand-off point between the GPU backend (which records the frame) and the
/// window backend (which presents it on buffer swap).
#[derive(Clone, Default)]
pub struct FrameSlot(Rc<RefCell<Option<GpuFrame>>>);

impl FrameSlot {
    /// Stores `frame`, discarding an unpresented previous one.
    pub fn put(&self, frame: GpuFrame) {
        if self.0.borrow_mut().replace(frame).is_some() {
            log::debug!("discarding a frame that was never presented");
        }
    }

    pub fn take(&self) -> Option<GpuFrame> {
        self.0.borrow_mut().take()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().take();
    }

    /// Runs `f` against the pending frame. Returns `false` when no frame is pending.
    pub fn with_frame<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut GpuFrame),
    {
        match self.0.borrow_mut().as_mut() {
            Some(frame) => {
                f(frame);
                true
            }
            None => false,
        }
    }
}
