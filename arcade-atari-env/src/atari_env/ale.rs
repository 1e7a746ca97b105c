//! Safe wrapper of the Arcade Learning Environment in `atari-env-sys`.
use anyhow::{Context, Result};
use c_str_macro::c_str;
use std::ffi::CString;
use std::path::Path;

/// Actions of the Atari 2600 joystick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum AleAction {
    Noop = 0,
    Fire = 1,
    Up = 2,
    Right = 3,
    Left = 4,
    Down = 5,
    UpRight = 6,
    UpLeft = 7,
    DownRight = 8,
    DownLeft = 9,
    UpFire = 10,
    RightFire = 11,
    LeftFire = 12,
    DownFire = 13,
    UpRightFire = 14,
    UpLeftFire = 15,
    DownRightFire = 16,
    DownLeftFire = 17,
}

/// Settings applied when the ROM is loaded.
pub struct AleConfig {
    pub random_seed: i32, // if 0, set to time
    pub display_screen: bool,
    pub sound: bool,
    pub color_averaging: bool, // average the last 2 frames
    /// Frame skip done inside ALE, 1 is no skip.
    pub frame_skip: i32,
    pub repeat_action_probability: f32,
    pub difficulty_setting: i32,
}

impl Default for AleConfig {
    fn default() -> Self {
        Self {
            random_seed: 0,
            display_screen: false,
            sound: false,
            color_averaging: false,
            frame_skip: 1,
            repeat_action_probability: 0.25,
            difficulty_setting: 0,
        }
    }
}

/// An emulator instance with a loaded ROM.
pub struct Ale {
    inner: *mut atari_env_sys::ALEInterface,
}

// The interface pointer is owned by this struct and never shared.
unsafe impl Send for Ale {}

impl Drop for Ale {
    fn drop(&mut self) {
        unsafe {
            atari_env_sys::ALE_del(self.inner);
        }
    }
}

impl Ale {
    /// Creates an emulator and loads the ROM at `rom_path`.
    pub fn new(rom_path: &Path, config: AleConfig) -> Result<Self> {
        let rom_path = CString::new(
            rom_path
                .to_str()
                .with_context(|| format!("ROM path is not UTF-8: {:?}", rom_path))?,
        )?;
        let ale = unsafe { atari_env_sys::ALE_new() };
        unsafe {
            atari_env_sys::setInt(ale, c_str!("random_seed").as_ptr(), config.random_seed);
            atari_env_sys::setBool(
                ale,
                c_str!("display_screen").as_ptr(),
                config.display_screen,
            );
            atari_env_sys::setBool(ale, c_str!("sound").as_ptr(), config.sound);
            atari_env_sys::setBool(
                ale,
                c_str!("color_averaging").as_ptr(),
                config.color_averaging,
            );
            atari_env_sys::setInt(ale, c_str!("frame_skip").as_ptr(), config.frame_skip);
            atari_env_sys::setFloat(
                ale,
                c_str!("repeat_action_probability").as_ptr(),
                config.repeat_action_probability,
            );
            atari_env_sys::loadROM(ale, rom_path.as_ptr());
            atari_env_sys::setDifficulty(ale, config.difficulty_setting);
            atari_env_sys::reset_game(ale);
        }

        Ok(Self { inner: ale })
    }

    /// Actions that have an effect in the loaded game.
    pub fn minimal_actions(&self) -> Vec<AleAction> {
        let n = unsafe { atari_env_sys::getMinimalActionSize(self.inner) } as usize;
        let mut buf = vec![AleAction::Noop; n];
        unsafe {
            atari_env_sys::getMinimalActionSet(self.inner, buf.as_mut_ptr() as *mut i32);
        }
        buf
    }

    pub fn is_game_over(&self) -> bool {
        unsafe { atari_env_sys::game_over(self.inner) }
    }

    pub fn reset(&mut self) {
        unsafe {
            atari_env_sys::reset_game(self.inner);
        }
    }

    /// returns reward
    pub fn take_action(&mut self, action: AleAction) -> i32 {
        let ret: ::std::os::raw::c_int = unsafe { atari_env_sys::act(self.inner, action as i32) };
        ret.into()
    }

    pub fn lives(&self) -> u32 {
        unsafe { atari_env_sys::lives(self.inner) as u32 }
    }

    pub fn width(&self) -> u32 {
        unsafe { atari_env_sys::getScreenWidth(self.inner) as u32 }
    }

    pub fn height(&self) -> u32 {
        unsafe { atari_env_sys::getScreenHeight(self.inner) as u32 }
    }

    pub fn rgb24_size(&self) -> usize {
        (self.width() as usize) * (self.height() as usize) * 3
    }

    /// always rgb in regardless of endianness
    pub fn rgb24(&self, buf: &mut [u8]) {
        unsafe {
            atari_env_sys::getScreenRGB2(self.inner, buf.as_mut_ptr());
        }
    }

    /// RGBA with the alpha channel set to zero, as expected by a pixel buffer.
    pub fn rgb32(&self, buf: &mut [u8]) {
        let n = buf.len() / 4;
        self.rgb24(&mut buf[n..]);
        for i in 0..n {
            buf[i * 4] = buf[n + (i * 3)];
            buf[i * 4 + 1] = buf[n + (i * 3) + 1];
            buf[i * 4 + 2] = buf[n + (i * 3) + 2];
            buf[i * 4 + 3] = 0;
        }
    }
}
