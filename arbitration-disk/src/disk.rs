// SPDX-License-Identifier: GPL-3.0-only

//! The disk entity tracked through arbitration

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use arbitration_types::keys::description;
use arbitration_types::{
    CallbackId, DeviceNumber, DiskOption, DiskState, FilesystemBinding, IdentityPolicy,
    PropertyBag, PropertyValue, Security, encode,
};
use enumflags2::BitFlags;
use uuid::Uuid;

use crate::error::DiskError;
use crate::handle::DeviceHandle;

/// Bytes of the id that feed the hash
pub(crate) const HASHED_ID_LEN: usize = 16;

pub(crate) fn hash_id<H: Hasher>(id: &str, state: &mut H) {
    let bytes = id.as_bytes();
    state.write(&bytes[..bytes.len().min(HASHED_ID_LEN)]);
}

/// A disk known to the arbitration daemon
///
/// Identity is the `id` alone: the block device node for hardware-backed
/// disks, the mount point for volume-backed ones. Two disks with the same id
/// compare equal and hash alike whatever their description holds.
pub struct Disk {
    id: String,
    description: PropertyBag,
    state: BitFlags<DiskState>,
    options: BitFlags<DiskOption>,
    security: Security,
    device: Option<DeviceHandle>,
    device_path: Option<String>,
    raw_device_path: Option<String>,
    device_number: Option<DeviceNumber>,
    bsd_unit: Option<i64>,
    bypath: Option<PathBuf>,
    filesystem: Option<Arc<FilesystemBinding>>,
    claim: Option<CallbackId>,
    context: Option<PropertyValue>,
    context_re: Option<PropertyValue>,
    serialization: OnceLock<Vec<u8>>,
}

impl Disk {
    pub(crate) fn new(id: impl Into<String>, policy: &IdentityPolicy) -> Self {
        let id = id.into();
        debug_assert!(!id.is_empty(), "disk id must not be empty");

        // Clients key on the NUL-terminated id blob.
        let mut id_blob = Vec::with_capacity(id.len() + 1);
        id_blob.extend_from_slice(id.as_bytes());
        id_blob.push(0);

        let description = PropertyBag::new().with(description::DISK_ID, id_blob);

        Self {
            id,
            description,
            state: BitFlags::empty(),
            options: BitFlags::empty(),
            security: Security::administrative(policy),
            device: None,
            device_path: None,
            raw_device_path: None,
            device_number: None,
            bsd_unit: None,
            bypath: None,
            filesystem: None,
            claim: None,
            context: None,
            context_re: None,
            serialization: OnceLock::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    // Description

    pub fn description(&self) -> &PropertyBag {
        &self.description
    }

    pub fn description_value(&self, key: &str) -> Option<&PropertyValue> {
        self.description.get(key)
    }

    /// Set `key` to `value`, or remove it when `value` is `None`
    pub fn set_description(&mut self, key: &str, value: Option<PropertyValue>) {
        match value {
            Some(value) => {
                self.description.insert(key, value);
            }
            None => {
                self.description.remove(key);
            }
        }
        self.serialization.take();
    }

    pub fn remove_description(&mut self, key: &str) -> Option<PropertyValue> {
        self.serialization.take();
        self.description.remove(key)
    }

    /// Apply several description edits with a single cache invalidation
    pub fn update_description<R>(&mut self, edit: impl FnOnce(&mut PropertyBag) -> R) -> R {
        self.serialization.take();
        edit(&mut self.description)
    }

    /// Order the description value for `key` against `value`
    ///
    /// Absent on both sides is equal, a missing description value sorts
    /// first, a missing `value` sorts last and unequal values are `Less`.
    pub fn compare_description(&self, key: &str, value: Option<&PropertyValue>) -> Ordering {
        match (self.description.get(key), value) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(current), Some(value)) if current == value => Ordering::Equal,
            (Some(_), Some(_)) => Ordering::Less,
        }
    }

    /// Canonical encoding of the current description, computed on first use
    pub fn serialization(&self) -> Result<&[u8], DiskError> {
        if let Some(bytes) = self.serialization.get() {
            return Ok(bytes);
        }

        let bytes = encode(&self.description)?;
        Ok(self.serialization.get_or_init(|| bytes))
    }

    pub fn has_cached_serialization(&self) -> bool {
        self.serialization.get().is_some()
    }

    // State and options

    pub fn state(&self, state: DiskState) -> bool {
        self.state.contains(state)
    }

    pub fn states(&self) -> BitFlags<DiskState> {
        self.state
    }

    /// Clear the named bits, then set them again if `value` is true
    pub fn set_state(&mut self, state: impl Into<BitFlags<DiskState>>, value: bool) {
        let state = state.into();
        self.state.remove(state);
        if value {
            self.state.insert(state);
        }
    }

    pub fn option(&self, option: DiskOption) -> bool {
        self.options.contains(option)
    }

    pub fn options(&self) -> BitFlags<DiskOption> {
        self.options
    }

    pub fn set_option(&mut self, option: DiskOption, value: bool) {
        self.set_options(option, value);
    }

    /// Clear the named bits, then set them again if `value` is true
    pub fn set_options(&mut self, options: impl Into<BitFlags<DiskOption>>, value: bool) {
        let options = options.into();
        self.options.remove(options);
        if value {
            self.options.insert(options);
        }
    }

    // Security

    pub fn security(&self) -> &Security {
        &self.security
    }

    pub(crate) fn security_mut(&mut self) -> &mut Security {
        &mut self.security
    }

    pub fn user_ruid(&self) -> u32 {
        self.security.real_uid
    }

    pub fn user_rgid(&self) -> u32 {
        self.security.real_gid
    }

    pub fn user_euid(&self) -> u32 {
        self.security.effective_uid
    }

    pub fn user_egid(&self) -> u32 {
        self.security.effective_gid
    }

    pub fn mode(&self) -> u32 {
        self.security.mode
    }

    pub fn set_user_euid(&mut self, uid: u32) {
        self.security.effective_uid = uid;
    }

    pub fn set_user_egid(&mut self, gid: u32) {
        self.security.effective_gid = gid;
    }

    // Device

    /// Registry entry of a hardware-backed disk
    pub fn device(&self) -> Option<&DeviceHandle> {
        self.device.as_ref()
    }

    pub(crate) fn attach_device(&mut self, handle: DeviceHandle) {
        self.device = Some(handle);
    }

    /// Block (`raw == false`) or raw character device node path
    pub fn device_path(&self, raw: bool) -> Option<&str> {
        if raw {
            self.raw_device_path.as_deref()
        } else {
            self.device_path.as_deref()
        }
    }

    pub(crate) fn set_device_paths(&mut self, block: String, raw: String) {
        self.device_path = Some(block);
        self.raw_device_path = Some(raw);
    }

    pub fn device_number(&self) -> Option<DeviceNumber> {
        self.device_number
    }

    pub(crate) fn set_device_number(&mut self, number: DeviceNumber) {
        self.device_number = Some(number);
    }

    pub fn bsd_unit(&self) -> Option<i64> {
        self.bsd_unit
    }

    pub(crate) fn set_bsd_unit(&mut self, unit: i64) {
        self.bsd_unit = Some(unit);
    }

    // Collaborator attachments

    pub fn bypath(&self) -> Option<&Path> {
        self.bypath.as_deref()
    }

    pub fn set_bypath(&mut self, bypath: Option<PathBuf>) {
        self.bypath = bypath;
    }

    pub fn filesystem(&self) -> Option<&Arc<FilesystemBinding>> {
        self.filesystem.as_ref()
    }

    pub fn set_filesystem(&mut self, filesystem: Option<Arc<FilesystemBinding>>) {
        self.filesystem = filesystem;
    }

    pub fn claim(&self) -> Option<CallbackId> {
        self.claim
    }

    /// Replace the current claim; `None` releases it
    pub fn set_claim(&mut self, claim: Option<CallbackId>) {
        self.claim = claim;
    }

    pub fn context(&self) -> Option<&PropertyValue> {
        self.context.as_ref()
    }

    pub fn set_context(&mut self, context: Option<PropertyValue>) {
        self.context = context;
    }

    pub fn context_re(&self) -> Option<&PropertyValue> {
        self.context_re.as_ref()
    }

    pub fn set_context_re(&mut self, context: Option<PropertyValue>) {
        self.context_re = context;
    }

    // Reporting

    /// One-line volume summary for mountable disks
    ///
    /// Columns are padded cumulatively to 10, 19, 56 and 80 characters:
    /// BSD name, volume kind, volume UUID, volume name, then the volume
    /// path or `[not mounted]`.
    pub fn summary_line(&self) -> Option<String> {
        let mountable = self
            .description
            .get_bool(description::VOLUME_MOUNTABLE)
            .unwrap_or(false);
        if !mountable {
            return None;
        }

        let bsd_name = self.description.get_str(description::MEDIA_BSD_NAME)?;

        let uuid = match self.description.get(description::VOLUME_UUID) {
            Some(PropertyValue::Uuid(uuid)) => *uuid,
            Some(PropertyValue::String(text)) => Uuid::parse_str(text).unwrap_or(Uuid::nil()),
            _ => Uuid::nil(),
        };

        let mut line = String::from(bsd_name);
        pad_to(&mut line, 10);
        line.push(' ');
        if let Some(kind) = self.description.get_str(description::VOLUME_KIND) {
            line.push_str(kind);
        }
        pad_to(&mut line, 19);
        line.push(' ');
        line.push_str(&uuid.hyphenated().to_string().to_uppercase());
        pad_to(&mut line, 56);
        line.push(' ');
        if let Some(name) = self.description.get_str(description::VOLUME_NAME) {
            line.push_str(name);
        }
        pad_to(&mut line, 80);
        line.push(' ');
        match self.description.get_str(description::VOLUME_PATH) {
            Some(path) => line.push_str(path),
            None => line.push_str("[not mounted]"),
        }

        Some(line)
    }

    pub fn log(&self) {
        if let Some(line) = self.summary_line() {
            tracing::info!("{}", line);
        }
    }
}

/// Pad with spaces or truncate so `line` is exactly `width` characters
fn pad_to(line: &mut String, width: usize) {
    let count = line.chars().count();
    if count < width {
        line.extend(std::iter::repeat_n(' ', width - count));
    } else if let Some((index, _)) = line.char_indices().nth(width) {
        line.truncate(index);
    }
}

impl PartialEq for Disk {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Disk {}

impl Hash for Disk {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_id(&self.id, state);
    }
}

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl fmt::Debug for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disk")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("options", &self.options)
            .field("security", &self.security)
            .field("device", &self.device)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
